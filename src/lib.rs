//! Review console - client for an AI-powered code review service.
//!
//! Submits source snippets to the review service under a caller-chosen
//! reference id and polls until the asynchronously produced analysis shows
//! up, then decodes it into typed results.
//!
//! # Architecture
//!
//! 1. **Client layer** (`client`) - HTTP client for the review service
//! 2. **Envelope layer** (`envelope`) - two-stage decoding of stored results
//! 3. **Poller** (`poller`) - per-reference-id polling state machine
//! 4. **Session** (`session`) - composition root the presentation layer reads
//!
//! The analysis itself happens service-side; this crate only submits,
//! watches, and decodes.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod poller;
pub mod session;
pub mod types;

pub use error::{Error, Result};

/// Client version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
