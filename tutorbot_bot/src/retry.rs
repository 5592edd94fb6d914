use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;
use tutorbot_core::ProviderError;

/// What to do after a failed completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try again after `delay`. `message` is shown if the budget runs out.
    Retry {
        delay: Duration,
        message: Option<String>,
    },
    /// Stop now and show `message` (or the default apology).
    GiveUp { message: Option<String> },
}

/// Decides how a failed completion attempt is handled.
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, error: &anyhow::Error) -> RetryDecision;
}

/// Retries every failure immediately with the default apology.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryUniformly;

impl ErrorClassifier for RetryUniformly {
    fn classify(&self, _error: &anyhow::Error) -> RetryDecision {
        RetryDecision::Retry {
            delay: Duration::ZERO,
            message: None,
        }
    }
}

/// Distinguishes rate limits, timeouts and connection failures.
///
/// Rate limits wait for the provider's `Retry-After` (20s when absent),
/// timeouts wait 5s, connection failures and anything unrecognised give up
/// immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAwareClassifier;

impl StatusAwareClassifier {
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(20);
    pub const TIMEOUT_DELAY: Duration = Duration::from_secs(5);

    pub const RATE_LIMIT_MESSAGE: &'static str = "提问太快啦，请休息一下再问我吧";
    pub const TIMEOUT_MESSAGE: &'static str = "我没有收到你的消息";
    pub const CONNECTION_MESSAGE: &'static str = "我连接不到你的网络";
}

impl ErrorClassifier for StatusAwareClassifier {
    fn classify(&self, error: &anyhow::Error) -> RetryDecision {
        match ProviderError::find(error) {
            Some(ProviderError::RateLimited { retry_after }) => RetryDecision::Retry {
                delay: retry_after.unwrap_or(Self::RATE_LIMIT_DELAY),
                message: Some(Self::RATE_LIMIT_MESSAGE.to_string()),
            },
            Some(ProviderError::Timeout) => RetryDecision::Retry {
                delay: Self::TIMEOUT_DELAY,
                message: Some(Self::TIMEOUT_MESSAGE.to_string()),
            },
            Some(ProviderError::Connection(_)) => RetryDecision::GiveUp {
                message: Some(Self::CONNECTION_MESSAGE.to_string()),
            },
            _ => RetryDecision::GiveUp { message: None },
        }
    }
}

/// The operation failed and will not be retried.
#[derive(Debug)]
pub struct GaveUp {
    pub attempts: u32,
    pub error: anyhow::Error,
    pub message: Option<String>,
}

/// Run `operation` until it succeeds, the classifier gives up, or
/// `max_retries` retries have been spent.
///
/// The first call is not a retry, so at most `max_retries + 1` calls are made.
pub async fn retry_with_classifier<F, Fut, T>(
    mut operation: F,
    classifier: &dyn ErrorClassifier,
    max_retries: u32,
) -> Result<T, GaveUp>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut retry_count = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                warn!("Request failed (attempt {}): {e}", retry_count + 1);
                match classifier.classify(&e) {
                    RetryDecision::Retry { delay, .. } if retry_count < max_retries => {
                        retry_count += 1;
                        warn!(
                            "Retry {retry_count}/{max_retries} after {}ms",
                            delay.as_millis()
                        );
                        if !delay.is_zero() {
                            sleep(delay).await;
                        }
                    }
                    RetryDecision::Retry { message, .. } | RetryDecision::GiveUp { message } => {
                        return Err(GaveUp {
                            attempts: retry_count + 1,
                            error: e,
                            message,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_classifier(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), anyhow::Error>(())
                }
            },
            &RetryUniformly,
            2,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_succeeds_after_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_classifier(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(anyhow::anyhow!("fail"))
                    } else {
                        Ok(count)
                    }
                }
            },
            &RetryUniformly,
            2,
        )
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_fails_after_all_attempts() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), GaveUp> = retry_with_classifier(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow::anyhow!("fail"))
                }
            },
            &RetryUniformly,
            2,
        )
        .await;
        let gave_up = result.unwrap_err();
        assert_eq!(gave_up.attempts, 3);
        assert!(gave_up.message.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn give_up_decision_stops_immediately() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), GaveUp> = retry_with_classifier(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow::Error::from(ProviderError::Connection(
                        "refused".to_string(),
                    )))
                }
            },
            &StatusAwareClassifier,
            2,
        )
        .await;
        let gave_up = result.unwrap_err();
        assert_eq!(gave_up.attempts, 1);
        assert_eq!(
            gave_up.message.as_deref(),
            Some(StatusAwareClassifier::CONNECTION_MESSAGE)
        );
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn persistent_rate_limit_keeps_rate_limit_message() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), GaveUp> = retry_with_classifier(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow::Error::from(ProviderError::RateLimited {
                        retry_after: Some(Duration::from_millis(1)),
                    }))
                }
            },
            &StatusAwareClassifier,
            2,
        )
        .await;
        let gave_up = result.unwrap_err();
        assert_eq!(gave_up.attempts, 3);
        assert_eq!(
            gave_up.message.as_deref(),
            Some(StatusAwareClassifier::RATE_LIMIT_MESSAGE)
        );
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn status_aware_rate_limit_prefers_retry_after() {
        let err = ProviderError::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        }
        .into();
        assert_eq!(
            StatusAwareClassifier.classify(&err),
            RetryDecision::Retry {
                delay: Duration::from_secs(3),
                message: Some(StatusAwareClassifier::RATE_LIMIT_MESSAGE.to_string()),
            }
        );

        let err = ProviderError::RateLimited { retry_after: None }.into();
        assert!(matches!(
            StatusAwareClassifier.classify(&err),
            RetryDecision::Retry { delay, .. } if delay == StatusAwareClassifier::RATE_LIMIT_DELAY
        ));
    }

    #[test]
    fn status_aware_timeout_retries_after_delay() {
        let err = ProviderError::Timeout.into();
        assert!(matches!(
            StatusAwareClassifier.classify(&err),
            RetryDecision::Retry { delay, .. } if delay == StatusAwareClassifier::TIMEOUT_DELAY
        ));
    }

    #[test]
    fn status_aware_unknown_error_gives_up() {
        let err = anyhow::anyhow!("unexpected");
        assert_eq!(
            StatusAwareClassifier.classify(&err),
            RetryDecision::GiveUp { message: None }
        );
    }

    #[test]
    fn uniform_always_retries_without_delay() {
        let err = ProviderError::Api {
            status: 500,
            body: String::new(),
        }
        .into();
        assert_eq!(
            RetryUniformly.classify(&err),
            RetryDecision::Retry {
                delay: Duration::ZERO,
                message: None,
            }
        );
    }
}
