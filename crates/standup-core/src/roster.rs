//! Roster filtering.
//!
//! Turns the configured roster plus today's [`RunDirectives`] into the list
//! of names eligible to speak. Filtering cannot fail.

use standup_models::{Member, RunDirectives};
use tracing::debug;

/// Builds the eligible roster for today.
///
/// Excluded names are removed from the roster first, guests are appended as
/// `Sometimes` members, and the category rules are applied last. Roster
/// order is kept, with guests at the end in the order they were given.
pub fn eligible_members(roster: &[Member], directives: &RunDirectives) -> Vec<Member> {
    let guests = directives.guests().iter().cloned().map(Member::sometimes);

    roster
        .iter()
        .filter(|member| !directives.is_excluded(&member.name))
        .cloned()
        .chain(guests)
        .filter(|member| directives.admits(member.category))
        .collect()
}

/// Returns the names eligible for today's meeting.
pub fn filter(roster: &[Member], directives: &RunDirectives) -> Vec<String> {
    let names: Vec<String> = eligible_members(roster, directives)
        .into_iter()
        .map(|member| member.name)
        .collect();

    debug!(
        roster = roster.len(),
        eligible = names.len(),
        guests = directives.guests().len(),
        excluded = directives.excluded().len(),
        "Filtered roster"
    );

    names
}
