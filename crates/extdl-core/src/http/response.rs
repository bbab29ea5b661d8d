//! Buffered response of a page fetch.

use std::borrow::Cow;

/// Result of one in-memory GET. `status_code` is 0 when no response arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub body: Vec<u8>,
    pub status_code: u32,
    pub error: Option<String>,
}

impl HttpResponse {
    /// Response for a request that never got a status line.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            body: Vec::new(),
            status_code: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200 && self.error.is_none()
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Human-readable failure reason, if any.
    pub fn failure_reason(&self) -> Option<String> {
        if self.is_ok() {
            return None;
        }
        Some(
            self.error
                .clone()
                .unwrap_or_else(|| format!("HTTP {}", self.status_code)),
        )
    }
}
