//! Backend analytics endpoint.

use crate::core::{AnalyticsPayload, ApiResponse, DateRange};
use std::time::Duration;
use thiserror::Error;
use ureq::Agent;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Analytics request failed: {0}")]
    Transport(String),

    #[error("Analytics endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Malformed analytics response: {0}")]
    Malformed(String),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Anything that can supply analytics for a date range.
pub trait AnalyticsSource {
    fn fetch(&self, range: &DateRange) -> Result<AnalyticsPayload, FetchError>;
}

/// Provider analytics over HTTP, authenticated with a bearer token.
pub struct HttpAnalyticsClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl HttpAnalyticsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analytics/provider", self.base_url)
    }
}

impl AnalyticsSource for HttpAnalyticsClient {
    fn fetch(&self, range: &DateRange) -> Result<AnalyticsPayload, FetchError> {
        let (start_date, end_date) = range.query_params();
        let url = self.endpoint();
        log::info!("Fetching analytics from {} for {}", url, range);

        let body = self
            .agent
            .get(&url)
            .query("start_date", &start_date)
            .query("end_date", &end_date)
            .header("Authorization", &format!("Bearer {}", self.token))
            .call()?
            .body_mut()
            .read_to_string()?;

        parse_response(&body)
    }
}

/// Decode the `{ "data": ... }` envelope around the analytics payload.
pub fn parse_response(body: &str) -> Result<AnalyticsPayload, FetchError> {
    let response: ApiResponse<AnalyticsPayload> = serde_json::from_str(body)?;
    Ok(response.data)
}
