use crate::error::ApiError;
use crate::responses::RawReport;
use async_trait::async_trait;
use configuration::ApiSettings;
use core_types::{ReportFilter, ReportRecord};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{RawCashFlow, into_records};

/// The generic, abstract interface to the report source.
/// This trait is the contract the session store uses, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait ReportsClient: Send + Sync {
    /// Fetches the complete report collection for the current session.
    async fn fetch_reports(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, ApiError>;
}

/// A concrete implementation of `ReportsClient` backed by the finsight HTTP API.
#[derive(Clone)]
pub struct HttpReportsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportsClient {
    /// Builds a client that authenticates every request with the given
    /// bearer token.
    pub fn new(settings: &ApiSettings, token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::Configuration(format!("invalid API token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReportsClient for HttpReportsClient {
    async fn fetch_reports(&self, filter: &ReportFilter) -> Result<Vec<ReportRecord>, ApiError> {
        let url = format!("{}/reports/generate", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(from) = filter.from {
            request = request.query(&[("from", from.to_string())]);
        }
        if let Some(to) = filter.to {
            request = request.query(&[("to", to.to_string())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), text));
        }

        let raw: Vec<RawReport> = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(responses::into_records(raw))
    }
}
