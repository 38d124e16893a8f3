//! Attendee randomization.
//!
//! Maps a permutation from a [`PermutationSource`] onto a list of names.

use standup_models::{Member, RunDirectives};
use tracing::debug;

use crate::error::Result;
use crate::permutation::{check_permutation, trivial_permutation, PermutationSource};
use crate::roster::filter;

/// Reorders `names` using a permutation from `source`.
///
/// Output position `i` holds `names[permutation[i]]`; indices always refer
/// to the original input order. Lists of zero or one name come back
/// unchanged without consulting `source`.
///
/// # Errors
/// Errors from `source` are returned unmodified. A source that hands back
/// something other than a permutation of `0..names.len()` yields
/// [`StandupError::Protocol`](crate::StandupError::Protocol).
pub fn randomize<S>(source: &S, names: &[String]) -> Result<Vec<String>>
where
    S: PermutationSource + ?Sized,
{
    if trivial_permutation(names.len()).is_some() {
        return Ok(names.to_vec());
    }

    let permutation = source.generate_permutation(names.len())?;
    check_permutation(&permutation, names.len())?;

    debug!(count = names.len(), "Randomized attendees");
    Ok(permutation.iter().map(|&i| names[i].clone()).collect())
}

/// Filters the roster and randomizes the result: today's speaking order.
///
/// Filtering happens before the remote call, so a failed call leaves the
/// filter's result unaffected.
pub fn todays_order<S>(
    roster: &[Member],
    directives: &RunDirectives,
    source: &S,
) -> Result<Vec<String>>
where
    S: PermutationSource + ?Sized,
{
    let eligible = filter(roster, directives);
    randomize(source, &eligible)
}
