//! Core data models for the stand-up order generator.
//!
//! This crate provides the fundamental data types shared by the core
//! pipeline and the CLI: roster members, their attendee categories, and the
//! per-run directives that decide who is eligible for today's meeting.

pub mod builders;
pub mod directives;
pub mod member;

// Re-export main types
pub use builders::RunDirectivesBuilder;
pub use directives::RunDirectives;
pub use member::{AttendeeCategory, Member, ParseCategoryError};
