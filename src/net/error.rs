//! Error domains shared by polling, streaming, and command dispatch.
//!
//! ERROR HANDLING
//! ==============
//! Every variant is non-fatal. Sources store the `Display` text as their
//! error indicator and views render it inline next to the last good data.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of one refresh cycle, stream message, or command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Request or channel failed before a response arrived.
    #[error("connection failed: {0}")]
    Transport(String),
    /// Server answered with a non-success status code.
    #[error("request failed: {0}")]
    Status(u16),
    /// Payload arrived but did not match the expected schema.
    #[error("invalid payload: {0}")]
    Decode(String),
    /// Network access is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl SourceError {
    /// True for the transport domain (connection failures and bad statuses).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_) | Self::Unavailable)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
