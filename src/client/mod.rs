//! HTTP client for the review service.
//!
//! Wraps the two endpoints the console talks to: manual submission and
//! per-reference-id result fetching.

use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{ReviewRecord, ReviewRequest};
use crate::VERSION;

/// User agent string for API requests.
fn user_agent() -> String {
    format!("review-console/{} (rust)", VERSION)
}

/// API client for the review service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_id: String,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: Uuid::new_v4().to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a snippet for manual review.
    ///
    /// One outbound call, no retry. On acknowledgement the request's own
    /// reference id is returned unchanged; the service does not mint a new
    /// one, and the response body is ignored beyond the status line.
    pub async fn submit(&self, request: &ReviewRequest) -> Result<String> {
        let url = format!("{}/manual", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Request-Session-Id", &self.session_id)
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .json(request)
            .send()
            .await?;

        self.check_status(response).await?;
        debug!(pr_id = %request.pr_id, filename = %request.filename, "Submitted review request");

        Ok(request.pr_id.clone())
    }

    /// Fetch the stored reviews for a reference id, most recent first.
    ///
    /// An empty array means the analysis has not been produced yet; that is
    /// a normal outcome, not a failure.
    pub async fn fetch_reviews(&self, pr_id: &str) -> Result<Vec<ReviewRecord>> {
        let url = format!("{}/pr/{}", self.base_url, pr_id);

        let response = self
            .client
            .get(&url)
            .header("X-Request-Session-Id", &self.session_id)
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .send()
            .await?;

        let response = self.check_status(response).await?;
        let records = response.json().await?;

        Ok(records)
    }

    /// Turn a non-success response into an API error.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown");
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), status_text, body));
        }

        Ok(response)
    }
}
