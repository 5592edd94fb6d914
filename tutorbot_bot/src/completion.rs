//! One remote completion for a session, with bounded retry.

use std::sync::Arc;
use tracing::{debug, info, warn};
use tutorbot_core::{CompletionRequest, END_OF_TEXT, GenerationParams, LLMProvider};
use tutorbot_session::Session;

use crate::retry::{ErrorClassifier, RetryUniformly, retry_with_classifier};

/// Shown to the user when every attempt failed.
pub const FALLBACK_REPLY: &str = "我现在有点累了，等会再来吧";

/// Retries after the initial attempt.
pub const MAX_RETRIES: u32 = 2;

/// Outcome of [`Completer::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Reply {
        total_tokens: u32,
        completion_tokens: u32,
        content: String,
    },
    GaveUp {
        message: String,
    },
}

/// Strip surrounding whitespace, then the end-of-text sentinel.
fn clean_content(raw: &str) -> String {
    raw.trim().replace(END_OF_TEXT, "")
}

/// Sends a session's history to the provider.
pub struct Completer<P> {
    provider: P,
    params: GenerationParams,
    classifier: Arc<dyn ErrorClassifier>,
    max_retries: u32,
}

impl<P> Completer<P>
where
    P: LLMProvider,
{
    pub fn new(provider: P, params: GenerationParams) -> Self {
        Self {
            provider,
            params,
            classifier: Arc::new(RetryUniformly),
            max_retries: MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub async fn complete(&self, session: &Session) -> Completion {
        let request = CompletionRequest::new(
            session.model().to_string(),
            session.messages().to_vec(),
            self.params.clone(),
        );

        let result = retry_with_classifier(
            || self.provider.chat(&request),
            self.classifier.as_ref(),
            self.max_retries,
        )
        .await;

        match result {
            Ok(response) => {
                let content = clean_content(&response.content);
                let usage = response.usage.unwrap_or_default();
                info!(
                    "[{}] reply={content}, total_tokens={}",
                    session.session_id(),
                    usage.total_tokens
                );
                debug!(
                    "[{}] completion_tokens={}",
                    session.session_id(),
                    usage.completion_tokens
                );
                Completion::Reply {
                    total_tokens: usage.total_tokens,
                    completion_tokens: usage.completion_tokens,
                    content,
                }
            }
            Err(gave_up) => {
                warn!(
                    "[{}] giving up after {} attempts: {}",
                    session.session_id(),
                    gave_up.attempts,
                    gave_up.error
                );
                Completion::GaveUp {
                    message: gave_up
                        .message
                        .unwrap_or_else(|| FALLBACK_REPLY.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_content_trims_then_strips_sentinel() {
        assert_eq!(clean_content("  hello<|endoftext|>\n"), "hello");
        assert_eq!(clean_content("a<|endoftext|>b"), "ab");
        assert_eq!(clean_content("hi <|endoftext|>"), "hi ");
        assert_eq!(clean_content("plain"), "plain");
    }
}
