use std::time::Duration;
use thiserror::Error;

/// Failure modes of a single chat-completion request.
///
/// Providers wrap these in `anyhow::Error`; retry policies recover them with
/// `downcast_ref`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("rate limited by provider (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Find a `ProviderError` anywhere in an error chain.
    #[must_use]
    pub fn find(err: &anyhow::Error) -> Option<&Self> {
        err.chain().find_map(|cause| cause.downcast_ref::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_through_context() {
        let err = anyhow::Error::new(ProviderError::Timeout).context("calling groq");
        assert!(matches!(ProviderError::find(&err), Some(ProviderError::Timeout)));
    }

    #[test]
    fn find_returns_none_for_foreign_errors() {
        let err = anyhow::anyhow!("boom");
        assert!(ProviderError::find(&err).is_none());
    }
}
