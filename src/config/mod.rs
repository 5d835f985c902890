//! Configuration management for the review console.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::Language;

/// Default base URL of the review service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/review";

/// Default period between result fetches (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Command-line arguments for the review console.
#[derive(Parser, Debug, Clone)]
#[command(name = "review-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for an AI-powered code review service")]
pub struct Args {
    /// Source file to submit for review
    pub file: PathBuf,

    /// Language of the submitted code
    #[arg(short, long, default_value = "java", env = "REVIEW_LANGUAGE")]
    pub language: Language,

    /// Reference id used to correlate the submission with its results
    #[arg(short, long, default_value = "manual-test", env = "REVIEW_PR_ID")]
    pub pr_id: String,

    /// Base URL of the review service
    #[arg(long, default_value = DEFAULT_API_URL, env = "REVIEW_API_URL")]
    pub api_url: String,

    /// Poll period in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS, env = "REVIEW_POLL_INTERVAL_MS")]
    pub interval_ms: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30, env = "REVIEW_HTTP_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long, env = "REVIEW_DEBUG")]
    pub debug: bool,
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the review service
    pub api_url: String,
    /// Poll period in milliseconds
    pub interval_ms: u64,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Debug mode
    pub debug: bool,
}

impl Config {
    /// Period between result fetches.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Timeout applied to each HTTP request.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            api_url: args.api_url.clone(),
            interval_ms: args.interval_ms,
            timeout_secs: args.timeout_secs,
            debug: args.debug,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_secs: 30,
            debug: false,
        }
    }
}
