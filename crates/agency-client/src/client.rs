//! HTTP client for the agency listing endpoint.
//!
//! Wraps `reqwest` with the endpoint's URL layout and typed decoding. There is
//! no retry policy: a failed read is logged and handed back to the caller.

use std::time::Duration;

use agency_core::config::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT};
use agency_core::{AgencyRecord, AppConfig};
use reqwest::{Client, Url};

use crate::error::FetchError;

/// Client for the agency listing API.
///
/// Use [`AgencyClient::from_config`] in the binary or
/// [`AgencyClient::with_base_url`] to point at a mock server in tests.
pub struct AgencyClient {
    client: Client,
    agencies_url: Url,
}

impl AgencyClient {
    /// Creates a client for the default local API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Creates a client against `base_url` with no request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`FetchError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::build(base_url, None, 10, DEFAULT_USER_AGENT)
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`AgencyClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::build(
            &config.api_base_url,
            config.http_timeout_secs,
            config.http_connect_timeout_secs,
            &config.user_agent,
        )
    }

    fn build(
        base_url: &str,
        timeout_secs: Option<u64>,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            agencies_url: agencies_url(base_url)?,
        })
    }

    /// The fully resolved listing URL.
    #[must_use]
    pub fn agencies_url(&self) -> &Url {
        &self.agencies_url
    }

    /// Fetches every agency record, in the order the server returns them.
    ///
    /// Failures are logged at `error` level before being returned.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FetchError::Deserialize`] if the body is not a JSON array of
    ///   agency records.
    pub async fn fetch_agencies(&self) -> Result<Vec<AgencyRecord>, FetchError> {
        match self.request_agencies().await {
            Ok(records) => {
                tracing::debug!(
                    url = %self.agencies_url,
                    count = records.len(),
                    "fetched agencies"
                );
                Ok(records)
            }
            Err(e) => {
                tracing::error!(url = %self.agencies_url, error = %e, "error fetching agencies");
                Err(e)
            }
        }
    }

    async fn request_agencies(&self) -> Result<Vec<AgencyRecord>, FetchError> {
        let response = self.client.get(self.agencies_url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: self.agencies_url.to_string(),
            source: e,
        })
    }
}

/// Resolves `{base_url}/agencies`.
///
/// The base is normalised to end with exactly one slash so that `join`
/// appends a segment instead of replacing the last one.
fn agencies_url(base_url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason,
    };
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    base.join("agencies").map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
