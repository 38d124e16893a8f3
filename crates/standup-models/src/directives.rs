//! Per-run directives.
//!
//! [`RunDirectives`] captures everything the command line says about today's
//! meeting. It is built once per process and never mutated afterwards.

use std::collections::HashSet;

use crate::builders::RunDirectivesBuilder;
use crate::member::AttendeeCategory;

/// Inclusion and exclusion rules for one run.
///
/// Guests are modeled as `Sometimes` members, so a non-empty guest list
/// always enables the `Sometimes` category. That coupling is computed here
/// at construction and cannot be undone afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunDirectives {
    include_boss: bool,
    include_sometimes: bool,
    guests: Vec<String>,
    excluded: HashSet<String>,
}

impl RunDirectives {
    /// Creates directives from raw flag values.
    ///
    /// `include_sometimes` is forced on whenever `guests` is non-empty.
    pub fn new<G, E>(include_boss: bool, include_sometimes: bool, guests: G, excluded: E) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let guests: Vec<String> = guests.into_iter().map(Into::into).collect();
        let excluded: HashSet<String> = excluded.into_iter().map(Into::into).collect();

        Self {
            include_boss,
            include_sometimes: include_sometimes || !guests.is_empty(),
            guests,
            excluded,
        }
    }

    /// Returns a builder with everything switched off.
    pub fn builder() -> RunDirectivesBuilder {
        RunDirectivesBuilder::new()
    }

    /// Whether `Boss` members are included.
    pub fn include_boss(&self) -> bool {
        self.include_boss
    }

    /// Whether `Sometimes` members are included.
    pub fn include_sometimes(&self) -> bool {
        self.include_sometimes
    }

    /// Guest names, in the order they were given.
    pub fn guests(&self) -> &[String] {
        &self.guests
    }

    /// Roster names excluded from this meeting.
    pub fn excluded(&self) -> &HashSet<String> {
        &self.excluded
    }

    /// Exact-match exclusion check; no case folding or trimming.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Whether members of `category` are visible under these directives.
    pub fn admits(&self, category: AttendeeCategory) -> bool {
        match category {
            AttendeeCategory::Worker => true,
            AttendeeCategory::Boss => self.include_boss,
            AttendeeCategory::Sometimes => self.include_sometimes,
        }
    }
}
