//! Settings file loading.
//!
//! The settings file is JSON with PascalCase keys:
//!
//! ```text
//! {
//!   "APIKey": "00000000-0000-0000-0000-000000000000",
//!   "APIURI": "https://api.random.org/json-rpc/2/invoke",
//!   "RequestTimeoutSecs": 30,
//!   "MeetingMembers": [
//!     { "Name": "Alex Trebek", "AttendeeType": "Boss" },
//!     { "Name": "Sam", "AttendeeType": "Worker" }
//!   ]
//! }
//! ```
//!
//! # Lookup
//!
//! The path given on the command line is `~`-expanded. A relative path is
//! tried against the current directory first, then against
//! `<config dir>/standup/` (e.g. `~/.config/standup/` on Linux).
//!
//! # Environment Variables
//!
//! - `STANDUP_API_KEY`: Override `APIKey`
//! - `STANDUP_API_URI`: Override `APIURI`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use standup_models::Member;
use thiserror::Error;
use tracing::debug;

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Default random.org JSON-RPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.random.org/json-rpc/2/invoke";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest request timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "STANDUP_API_KEY";

/// Environment variable overriding the endpoint.
pub const API_URI_ENV: &str = "STANDUP_API_URI";

/// Directory name under the user config directory.
const APP_DIR: &str = "standup";

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file does not exist.
    #[error("could not find settings file {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON or has the wrong shape.
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A meeting member has no name.
    #[error("meeting member #{index} has an empty name")]
    EmptyName {
        /// Zero-based position in `MeetingMembers`.
        index: usize,
    },

    /// A meeting member has an attendee type outside worker/boss/sometimes.
    #[error("meeting member '{name}' has unknown attendee type '{value}'")]
    UnknownCategory {
        /// Member name.
        name: String,
        /// Attendee type as written in the file.
        value: String,
    },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(rename = "APIKey", default)]
    api_key: Option<String>,

    #[serde(rename = "APIURI", default)]
    api_uri: Option<String>,

    #[serde(default)]
    request_timeout_secs: Option<u64>,

    #[serde(default)]
    meeting_members: Vec<MemberEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MemberEntry {
    #[serde(default)]
    name: String,

    #[serde(default)]
    attendee_type: String,
}

/// Loaded and validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    api_key: Option<String>,
    endpoint: String,
    request_timeout: Duration,
    roster: Vec<Member>,
}

impl Settings {
    /// Loads settings from a JSON file.
    ///
    /// # Errors
    /// Returns [`SettingsError::NotFound`] if the file is missing, and the
    /// parse/validation errors of [`Settings::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SettingsError::NotFound {
                path: path.to_path_buf(),
            },
            _ => SettingsError::Io(e),
        })?;

        let settings = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            members = settings.roster.len(),
            endpoint = %settings.endpoint,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Parses and validates settings from JSON text.
    ///
    /// Attendee types are normalized to [`standup_models::AttendeeCategory`]
    /// here, ignoring case.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SettingsFile = serde_json::from_str(json)?;

        let roster = file
            .meeting_members
            .into_iter()
            .enumerate()
            .map(|(index, entry)| -> Result<Member> {
                if entry.name.is_empty() {
                    return Err(SettingsError::EmptyName { index });
                }
                let category =
                    entry
                        .attendee_type
                        .parse()
                        .map_err(|_| SettingsError::UnknownCategory {
                            name: entry.name.clone(),
                            value: entry.attendee_type.clone(),
                        })?;
                Ok(Member::new(entry.name, category))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            api_key: file.api_key,
            endpoint: file
                .api_uri
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            roster,
        })
    }

    /// Applies explicit overrides for the credential and endpoint.
    pub fn with_overrides(mut self, api_key: Option<String>, endpoint: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// Applies `STANDUP_API_KEY` and `STANDUP_API_URI` if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(API_URI_ENV).ok(),
        )
    }

    /// The configured roster, in file order.
    pub fn roster(&self) -> &[Member] {
        &self.roster
    }

    /// The randomness service endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The randomness service API key, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Get the per-user settings directory (`<config dir>/standup`).
pub fn user_settings_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Resolves the settings file path given on the command line.
///
/// # Errors
/// Returns [`SettingsError::NotFound`] with the expanded path when neither
/// location holds the file.
pub fn resolve_settings_path(raw: &str) -> Result<PathBuf> {
    let path = PathBuf::from(shellexpand::tilde(raw).as_ref());
    resolve_in(&path, user_settings_dir().as_deref())
}

fn resolve_in(path: &Path, fallback_dir: Option<&Path>) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.is_relative() {
        if let Some(candidate) = fallback_dir.map(|dir| dir.join(path)) {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Using settings from user config dir");
                return Ok(candidate);
            }
        }
    }

    Err(SettingsError::NotFound {
        path: path.to_path_buf(),
    })
}
