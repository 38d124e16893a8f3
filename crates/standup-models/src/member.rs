//! Roster member types.
//!
//! A member is a name plus an attendee category. Categories arrive as
//! free-form strings in the settings file and are normalized into
//! [`AttendeeCategory`] once, at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attendee category of a roster member.
///
/// Governs whether the member is visible in the meeting list by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum AttendeeCategory {
    /// Regular attendee, always in the list.
    #[default]
    Worker,
    /// Only in the list when the boss is explicitly included.
    Boss,
    /// Occasional attendee; included on request or whenever guests are added.
    Sometimes,
}

impl AttendeeCategory {
    /// Returns the canonical lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Boss => "boss",
            Self::Sometimes => "sometimes",
        }
    }
}

impl fmt::Display for AttendeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an attendee type string is not a known category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown attendee type '{0}' (expected worker, boss or sometimes)")]
pub struct ParseCategoryError(pub String);

impl FromStr for AttendeeCategory {
    type Err = ParseCategoryError;

    /// Parses a category name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("worker") {
            Ok(Self::Worker)
        } else if s.eq_ignore_ascii_case("boss") {
            Ok(Self::Boss)
        } else if s.eq_ignore_ascii_case("sometimes") {
            Ok(Self::Sometimes)
        } else {
            Err(ParseCategoryError(s.to_string()))
        }
    }
}

impl TryFrom<String> for AttendeeCategory {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttendeeCategory> for String {
    fn from(category: AttendeeCategory) -> Self {
        category.as_str().to_string()
    }
}

/// A member of the meeting roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Display name, matched byte-for-byte against exclusions.
    pub name: String,

    /// Attendee category.
    pub category: AttendeeCategory,
}

impl Member {
    /// Creates a new member.
    pub fn new(name: impl Into<String>, category: AttendeeCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Creates a regular worker.
    pub fn worker(name: impl Into<String>) -> Self {
        Self::new(name, AttendeeCategory::Worker)
    }

    /// Creates a boss.
    pub fn boss(name: impl Into<String>) -> Self {
        Self::new(name, AttendeeCategory::Boss)
    }

    /// Creates an occasional attendee.
    ///
    /// Ad-hoc guests are modeled this way too.
    pub fn sometimes(name: impl Into<String>) -> Self {
        Self::new(name, AttendeeCategory::Sometimes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_ignores_case() {
        assert_eq!("Worker".parse(), Ok(AttendeeCategory::Worker));
        assert_eq!("BOSS".parse(), Ok(AttendeeCategory::Boss));
        assert_eq!("sometimes".parse(), Ok(AttendeeCategory::Sometimes));
        assert_eq!("SomeTimes".parse(), Ok(AttendeeCategory::Sometimes));
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        let err = "intern".parse::<AttendeeCategory>().unwrap_err();
        assert_eq!(err, ParseCategoryError("intern".to_string()));
        assert!(err.to_string().contains("intern"));

        // No trimming either
        assert!(" boss".parse::<AttendeeCategory>().is_err());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(AttendeeCategory::Worker.to_string(), "worker");
        assert_eq!(AttendeeCategory::Boss.to_string(), "boss");
        assert_eq!(AttendeeCategory::Sometimes.to_string(), "sometimes");
    }

    #[test]
    fn test_member_serde() {
        let member: Member =
            serde_json::from_str(r#"{"name": "Alex Trebek", "category": "Boss"}"#).unwrap();
        assert_eq!(member, Member::boss("Alex Trebek"));

        let json = serde_json::to_string(&Member::worker("Sam")).unwrap();
        assert_eq!(json, r#"{"name":"Sam","category":"worker"}"#);

        let bad = serde_json::from_str::<Member>(r#"{"name": "X", "category": "ceo"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_member_constructors() {
        assert_eq!(Member::worker("a").category, AttendeeCategory::Worker);
        assert_eq!(Member::boss("b").category, AttendeeCategory::Boss);
        assert_eq!(Member::sometimes("c").category, AttendeeCategory::Sometimes);
        assert_eq!(Member::sometimes("c").name, "c");
    }
}
