//! random.org JSON-RPC client.
//!
//! Requests `n` unique integers from `[0, n-1]` via the `generateIntegers`
//! method and validates that they form a permutation. The client is
//! blocking; every request is bounded by the configured timeout.

use std::cell::Cell;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{Result, StandupError};
use crate::permutation::{trivial_permutation, validate_permutation, PermutationSource};
use crate::settings::{Settings, MAX_TIMEOUT_SECS};

/// JSON-RPC protocol version sent with every request.
const JSONRPC_VERSION: &str = "2.0";

/// random.org method for integer sequences.
const GENERATE_INTEGERS: &str = "generateIntegers";

/// Longest pause honored for an `advisoryDelay`, in milliseconds.
const MAX_ADVISORY_DELAY_MS: u64 = 60_000;

/// random.org JSON-RPC client.
pub struct RandomOrgClient {
    client: reqwest::blocking::Client,
    endpoint: Url,
    api_key: String,
    /// Earliest time the next request may go out, per the service's
    /// `advisoryDelay`.
    not_before: Cell<Option<Instant>>,
}

impl std::fmt::Debug for RandomOrgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomOrgClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl RandomOrgClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns [`StandupError::Config`] if the API key is blank, the endpoint
    /// is not an `http`/`https` URL, or the timeout is zero or longer than
    /// [`MAX_TIMEOUT_SECS`]. No network traffic happens here.
    pub fn new(endpoint: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(StandupError::Config(
                "missing random.org API key".to_string(),
            ));
        }

        let endpoint = Url::parse(endpoint).map_err(|e| {
            StandupError::Config(format!("invalid service endpoint '{}': {}", endpoint, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(StandupError::Config(format!(
                "unsupported endpoint scheme '{}'",
                endpoint.scheme()
            )));
        }

        if timeout.is_zero() {
            return Err(StandupError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(StandupError::Config(format!(
                "request timeout of {}s exceeds the {}s limit",
                timeout.as_secs(),
                MAX_TIMEOUT_SECS
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StandupError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            not_before: Cell::new(None),
        })
    }

    /// Create a client from loaded settings.
    ///
    /// `timeout` overrides the timeout from the settings file when given.
    pub fn from_settings(settings: &Settings, timeout: Option<Duration>) -> Result<Self> {
        Self::new(
            settings.endpoint(),
            settings.api_key().unwrap_or_default(),
            timeout.unwrap_or_else(|| settings.request_timeout()),
        )
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Requests `n` unique integers from `[0, n-1]` and validates the result.
    fn request_permutation(&self, n: usize) -> Result<Vec<usize>> {
        self.wait_for_advisory_delay();

        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method: GENERATE_INTEGERS,
            params: GenerateIntegersParams::permutation(&self.api_key, n),
            id: Uuid::new_v4().to_string(),
        };

        debug!(n, id = %request.id, "Requesting permutation from random.org");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StandupError::Transport(format!(
                "service returned HTTP {}",
                status
            )));
        }

        let body = response.text().map_err(transport_error)?;
        trace!(body = %body, "random.org response");

        let result = decode_response(&body, &request.id)?;
        debug!(
            requests_left = ?result.requests_left,
            bits_left = ?result.bits_left,
            advisory_delay_ms = ?result.advisory_delay,
            "random.org quota"
        );

        if let Some(delay) = result.advisory_delay.and_then(advisory_pause) {
            self.not_before.set(Some(Instant::now() + delay));
        }

        validate_permutation(&result.random.data, n)
    }

    /// Sleeps out whatever is left of the last advisory delay.
    fn wait_for_advisory_delay(&self) {
        if let Some(not_before) = self.not_before.take() {
            let remaining = not_before.saturating_duration_since(Instant::now());
            if !remaining.is_zero() {
                debug!(wait_ms = remaining.as_millis() as u64, "Honoring advisory delay");
                std::thread::sleep(remaining);
            }
        }
    }
}

impl PermutationSource for RandomOrgClient {
    fn generate_permutation(&self, n: usize) -> Result<Vec<usize>> {
        if let Some(trivial) = trivial_permutation(n) {
            return Ok(trivial);
        }
        self.request_permutation(n)
    }
}

/// Classifies a reqwest failure as a transport error.
/// Turns an `advisoryDelay` in milliseconds into a pause, capped at
/// [`MAX_ADVISORY_DELAY_MS`]. Zero means no pause.
fn advisory_pause(ms: u64) -> Option<Duration> {
    if ms == 0 {
        return None;
    }
    if ms > MAX_ADVISORY_DELAY_MS {
        warn!(
            advisory_delay_ms = ms,
            capped_ms = MAX_ADVISORY_DELAY_MS,
            "Capping advisory delay from random.org"
        );
    }
    Some(Duration::from_millis(ms.min(MAX_ADVISORY_DELAY_MS)))
}

fn transport_error(e: reqwest::Error) -> StandupError {
    let what = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "could not connect to service"
    } else {
        "request failed"
    };
    StandupError::Transport(format!("{}: {}", what, e))
}

/// Decodes a JSON-RPC response envelope.
///
/// # Errors
/// Returns [`StandupError::Protocol`] for non-JSON bodies, RPC error
/// payloads, a mismatched response id, or a missing result.
pub fn decode_response(body: &str, expected_id: &str) -> Result<GenerateIntegersResult> {
    let response: RpcResponse = serde_json::from_str(body)
        .map_err(|e| StandupError::Protocol(format!("malformed JSON-RPC response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(StandupError::Protocol(format!(
            "service error {}: {}",
            error.code, error.message
        )));
    }

    if response.id.as_str() != Some(expected_id) {
        return Err(StandupError::Protocol(format!(
            "response id {} does not match request id {}",
            response.id, expected_id
        )));
    }

    response
        .result
        .ok_or_else(|| StandupError::Protocol("response has neither result nor error".to_string()))
}

/// JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,

    /// Method name.
    pub method: &'static str,

    /// Method parameters.
    pub params: GenerateIntegersParams<'a>,

    /// Request id echoed back by the service.
    pub id: String,
}

/// Parameters for `generateIntegers`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIntegersParams<'a> {
    /// API key.
    pub api_key: &'a str,

    /// How many integers to draw.
    pub n: usize,

    /// Lower bound, inclusive.
    pub min: i64,

    /// Upper bound, inclusive.
    pub max: i64,

    /// Whether values may repeat.
    pub replacement: bool,

    /// Number base of the returned values.
    pub base: u32,
}

impl<'a> GenerateIntegersParams<'a> {
    /// Parameters for a permutation of `0..n` (requires `n >= 1`).
    pub fn permutation(api_key: &'a str, n: usize) -> Self {
        Self {
            api_key,
            n,
            min: 0,
            max: n as i64 - 1,
            replacement: false,
            base: 10,
        }
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Clone, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<GenerateIntegersResult>,

    #[serde(default)]
    error: Option<RpcError>,

    #[serde(default)]
    id: serde_json::Value,
}

/// Error payload of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Result of `generateIntegers`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIntegersResult {
    /// The drawn values.
    pub random: RandomData,

    /// Remaining bit allowance for the key.
    #[serde(default)]
    pub bits_left: Option<i64>,

    /// Remaining request allowance for the key.
    #[serde(default)]
    pub requests_left: Option<i64>,

    /// Milliseconds the client should wait before its next request.
    #[serde(default)]
    pub advisory_delay: Option<u64>,
}

/// Random values block of a `generateIntegers` result.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomData {
    /// The integers, in draw order.
    pub data: Vec<i64>,
}
