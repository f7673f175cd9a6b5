//! Numberland API client
//!
//! Thin blocking HTTP wrapper: one GET per API method, fixed timeout,
//! parsed JSON body out. Non-2xx statuses and malformed bodies
//! propagate as errors; there is no retry or backoff.

use crate::types::{NumexError, Result};
use serde_json::Value;
use std::time::Duration;

/// Numberland v2 endpoint
const BASE_URL: &str = "https://api.numberland.ir/v2.php/";

/// API key (fixed literal in this version, no override surface)
const API_KEY: &str = "7143e4c5a8173ca572232dcc15773cbc";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocking client for the Numberland API
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Create a client against the production endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL.to_string(), API_KEY.to_string())
    }

    /// Create a client against a custom endpoint (for testing)
    pub fn with_base_url(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NumexError::Api(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// GET one API method and parse the JSON body.
    ///
    /// `extra` carries method-specific query parameters; `getinfo`
    /// passes empty `operator` and `country` values meaning "all".
    pub fn call(&self, method: &str, extra: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("method", method)])
            .query(extra)
            .send()
            .map_err(|e| NumexError::Api(format!("{} request failed: {}", method, e)))?
            .error_for_status()
            .map_err(|e| NumexError::Api(format!("{} returned error status: {}", method, e)))?;

        response
            .json()
            .map_err(|e| NumexError::Api(format!("{} JSON parse error: {}", method, e)))
    }
}
