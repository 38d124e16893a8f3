//! Standup Core - attendee selection and randomization.
//!
//! This crate holds the pipeline behind the `standup` binary:
//!
//! - **settings**: Load the roster and service settings from JSON
//! - **roster**: Filter the roster by category, guests and exclusions
//! - **permutation**: The `PermutationSource` seam and permutation checks
//! - **random_org**: random.org JSON-RPC client producing permutations
//! - **randomizer**: Apply a permutation to the filtered names
//!
//! # Example
//!
//! ```no_run
//! use standup_core::{todays_order, RandomOrgClient, Settings};
//! use standup_models::RunDirectives;
//!
//! let settings = Settings::load("appsettings.json".as_ref()).unwrap();
//! let client = RandomOrgClient::from_settings(&settings, None).unwrap();
//! let directives = RunDirectives::builder().with_boss(true).build();
//!
//! for (i, name) in todays_order(settings.roster(), &directives, &client)
//!     .unwrap()
//!     .iter()
//!     .enumerate()
//! {
//!     println!("{}. {}", i + 1, name);
//! }
//! ```

pub mod error;
pub mod permutation;
pub mod random_org;
pub mod randomizer;
pub mod roster;
pub mod settings;

pub use error::{Result, StandupError};
pub use permutation::{check_permutation, validate_permutation, PermutationSource};
pub use random_org::RandomOrgClient;
pub use randomizer::{randomize, todays_order};
pub use roster::{eligible_members, filter};
pub use settings::{
    resolve_settings_path, user_settings_dir, Settings, SettingsError, DEFAULT_ENDPOINT,
    DEFAULT_SETTINGS_FILE, MAX_TIMEOUT_SECS,
};
