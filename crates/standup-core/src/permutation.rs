//! Permutation sources.
//!
//! The randomizer only needs "give me a permutation of `0..n`". The
//! [`PermutationSource`] trait is that seam; [`crate::RandomOrgClient`] is the
//! production implementation and tests plug in deterministic ones.

use std::fmt::Display;

use crate::error::{Result, StandupError};

/// Something that can produce a permutation of `0..n`.
pub trait PermutationSource {
    /// Returns a permutation of `0..n` with no repeats.
    ///
    /// # Errors
    /// Implementations report unreachable services as
    /// [`StandupError::Transport`] and invalid answers as
    /// [`StandupError::Protocol`]. They must not retry on their own.
    fn generate_permutation(&self, n: usize) -> Result<Vec<usize>>;
}

impl<T: PermutationSource + ?Sized> PermutationSource for &T {
    fn generate_permutation(&self, n: usize) -> Result<Vec<usize>> {
        (**self).generate_permutation(n)
    }
}

impl<T: PermutationSource + ?Sized> PermutationSource for Box<T> {
    fn generate_permutation(&self, n: usize) -> Result<Vec<usize>> {
        (**self).generate_permutation(n)
    }
}

/// The permutation for `n <= 1`, which needs no randomness.
pub fn trivial_permutation(n: usize) -> Option<Vec<usize>> {
    (n <= 1).then(|| (0..n).collect())
}

/// Checks that `values` is exactly a permutation of `0..n`.
///
/// Accepts signed input so values straight off the wire can be validated
/// before any conversion.
///
/// # Errors
/// Returns [`StandupError::Protocol`] on a wrong count, an out-of-range
/// value or a repeated value.
pub fn validate_permutation(values: &[i64], n: usize) -> Result<Vec<usize>> {
    collect_permutation(values, n, |value| usize::try_from(value).ok())
}

/// Same check as [`validate_permutation`], for indices already in `usize`.
pub fn check_permutation(indices: &[usize], n: usize) -> Result<()> {
    collect_permutation(indices, n, Some).map(drop)
}

fn collect_permutation<T, F>(values: &[T], n: usize, to_index: F) -> Result<Vec<usize>>
where
    T: Copy + Display,
    F: Fn(T) -> Option<usize>,
{
    if values.len() != n {
        return Err(StandupError::Protocol(format!(
            "expected {} integers, got {}",
            n,
            values.len()
        )));
    }

    let mut seen = vec![false; n];
    let mut permutation = Vec::with_capacity(n);
    for &value in values {
        // n >= 1 here: an empty `values` never enters the loop.
        let index = to_index(value).filter(|&i| i < n).ok_or_else(|| {
            StandupError::Protocol(format!("value {} is outside [0, {}]", value, n - 1))
        })?;
        if std::mem::replace(&mut seen[index], true) {
            return Err(StandupError::Protocol(format!(
                "value {} appears more than once",
                value
            )));
        }
        permutation.push(index);
    }

    Ok(permutation)
}
