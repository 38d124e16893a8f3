//! Builder for [`RunDirectives`].

use crate::directives::RunDirectives;

/// Fluent builder for [`RunDirectives`].
///
/// The guest/sometimes invariant is applied in [`build`](Self::build), so the
/// order of calls does not matter.
#[derive(Debug, Clone, Default)]
pub struct RunDirectivesBuilder {
    include_boss: bool,
    include_sometimes: bool,
    guests: Vec<String>,
    excluded: Vec<String>,
}

impl RunDirectivesBuilder {
    /// Creates a builder with every category toggle off and no names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether `Boss` members are included.
    pub fn with_boss(mut self, include: bool) -> Self {
        self.include_boss = include;
        self
    }

    /// Sets whether `Sometimes` members are included.
    ///
    /// Has no effect on the result when guests are present.
    pub fn with_sometimes(mut self, include: bool) -> Self {
        self.include_sometimes = include;
        self
    }

    /// Adds a single guest.
    pub fn guest(mut self, name: impl Into<String>) -> Self {
        self.guests.push(name.into());
        self
    }

    /// Adds several guests, keeping their order.
    pub fn guests<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.guests.extend(names.into_iter().map(Into::into));
        self
    }

    /// Excludes a single roster member.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.push(name.into());
        self
    }

    /// Excludes several roster members.
    pub fn excluding<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds the directives.
    pub fn build(self) -> RunDirectives {
        RunDirectives::new(
            self.include_boss,
            self.include_sometimes,
            self.guests,
            self.excluded,
        )
    }
}
