//! Request failure type for the HTTP client.

use crate::control::Cancelled;

/// Why a request or download did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Transfer completed with a status other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Destination could not be created, opened or written.
    #[error("{0:#}")]
    Storage(anyhow::Error),
    /// The run's `CancelToken` was set.
    #[error("download cancelled")]
    Cancelled,
}

impl From<Cancelled> for FetchError {
    fn from(_: Cancelled) -> Self {
        FetchError::Cancelled
    }
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
