//! Review session.
//!
//! Composition root tying submission to result polling: one active
//! reference id, one polling run, one published phase. The presentation
//! layer reads the phase and renders it; everything stateful lives here
//! and in the poller.

use std::time::Duration;
use tracing::info;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::poller::{Phase, PollerStats, ResultPoller};
use crate::types::ReviewRequest;

/// How often a waiting caller re-reads the published phase.
const PHASE_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// A submit-and-watch session against the review service.
pub struct ReviewSession {
    client: ApiClient,
    poller: ResultPoller,
}

impl ReviewSession {
    /// Create a session from the client configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = ApiClient::new(&config.api_url, config.http_timeout())?;
        let poller = ResultPoller::new(client.clone(), config.poll_interval());

        Ok(Self { client, poller })
    }

    /// Submit a snippet and start tracking its results.
    ///
    /// Rejects an empty snippet before any network traffic. On success the
    /// returned reference id replaces whatever the session was tracking
    /// before; on failure the error surfaces immediately, with no retry,
    /// and the previous tracking state is left untouched.
    pub async fn submit(&self, request: &ReviewRequest) -> Result<String> {
        if request.code.trim().is_empty() {
            return Err(Error::EmptyCode);
        }

        let pr_id = self.client.submit(request).await?;
        info!(%pr_id, "Review submitted; tracking results");
        self.poller.assign(pr_id.clone()).await;

        Ok(pr_id)
    }

    /// Track an already-submitted reference id without resubmitting.
    pub async fn track(&self, pr_id: impl Into<String>) {
        self.poller.assign(pr_id).await;
    }

    /// Stop tracking and drop any held result.
    pub async fn cancel(&self) {
        self.poller.cancel().await;
    }

    /// Phase of the current polling run.
    pub async fn phase(&self) -> Phase {
        self.poller.phase().await
    }

    /// The reference id the session is tracking, if any.
    pub async fn active_pr_id(&self) -> Option<String> {
        self.poller.pr_id().await
    }

    /// Counters for the current polling run.
    pub async fn stats(&self) -> PollerStats {
        self.poller.stats().await
    }

    /// Wait until the current run reaches a terminal phase.
    ///
    /// Returns [`Phase::Idle`] straight away when nothing is being tracked.
    /// There is no built-in cutoff: if the service never produces a result
    /// this waits forever, matching the poller's unbounded retry. Callers
    /// that need a bound should wrap this in `tokio::time::timeout`.
    pub async fn wait_for_result(&self) -> Phase {
        loop {
            match self.poller.phase().await {
                Phase::Pending => tokio::time::sleep(PHASE_CHECK_INTERVAL).await,
                phase => return phase,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: &str) -> Config {
        Config {
            api_url: api_url.to_string(),
            interval_ms: 50,
            timeout_secs: 5,
            debug: false,
        }
    }

    fn test_request(pr_id: &str) -> ReviewRequest {
        ReviewRequest {
            filename: "X.java".to_string(),
            language: Language::Java,
            code: "class X {}".to_string(),
            pr_id: pr_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_code_rejected_without_network() {
        let server = MockServer::start().await;

        // expect(0): validation must reject before anything goes out
        Mock::given(method("POST"))
            .and(path("/manual"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let session = ReviewSession::new(&test_config(&server.uri())).unwrap();
        let mut request = test_request("PR-1");
        request.code = "   \n".to_string();

        let err = session.submit(&request).await.unwrap_err();
        assert!(matches!(err, Error::EmptyCode));
        assert_eq!(session.phase().await, Phase::Idle);
    }

    #[tokio::test]
    async fn test_submit_failure_leaves_session_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manual"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let session = ReviewSession::new(&test_config(&server.uri())).unwrap();
        let err = session.submit(&test_request("PR-1")).await.unwrap_err();

        assert!(matches!(err, Error::Api { status: 502, .. }));
        assert_eq!(session.phase().await, Phase::Idle);
        assert_eq!(session.active_pr_id().await, None);
    }

    #[tokio::test]
    async fn test_wait_for_result_idle_returns_immediately() {
        let server = MockServer::start().await;
        let session = ReviewSession::new(&test_config(&server.uri())).unwrap();

        assert_eq!(session.wait_for_result().await, Phase::Idle);
    }

    #[tokio::test]
    async fn test_cancel_clears_tracking() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let session = ReviewSession::new(&test_config(&server.uri())).unwrap();
        session.track("PR-1").await;
        assert_eq!(session.active_pr_id().await, Some("PR-1".to_string()));

        session.cancel().await;
        assert_eq!(session.active_pr_id().await, None);
        assert_eq!(session.phase().await, Phase::Idle);
    }
}
