//! Error types for metrics fetching.

use thiserror::Error;

/// A failed `/metrics` fetch. Never retried by the poller; handed to the
/// caller's error callback instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("metrics request failed: {0}")]
    Transport(String),

    #[error("metrics endpoint returned {status}")]
    Status { status: u16, body: String },
}
