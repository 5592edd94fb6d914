use std::sync::Arc;
use tracing::{info, warn};
use tutorbot_core::{GenerationParams, LLMProvider};
use tutorbot_session::{SessionError, SessionStore};

use crate::completion::{Completer, Completion};
use crate::retry::ErrorClassifier;
use crate::{AdminCommand, ContentType, Context, Error, Reply, Result};

/// Turns one inbound query into one [`Reply`].
///
/// Holds no conversation state of its own; history lives in the shared
/// [`SessionStore`].
pub struct BotAdapter<P = Arc<dyn LLMProvider>> {
    store: Arc<SessionStore>,
    completer: Completer<P>,
}

impl<P> BotAdapter<P>
where
    P: LLMProvider,
{
    pub fn new(provider: P, store: Arc<SessionStore>, params: GenerationParams) -> Self {
        Self {
            store,
            completer: Completer::new(provider, params),
        }
    }

    /// Replace the default retry-uniformly policy.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.completer = self.completer.with_classifier(classifier);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Answer `query` for the session named in `context`.
    ///
    /// Remote failures never surface as `Err`; they become a
    /// [`ReplyKind::Error`](crate::ReplyKind::Error) reply. The only error is
    /// a non-text message.
    pub async fn reply(&self, query: &str, context: &Context) -> Result<Reply> {
        if context.content_type != ContentType::Text {
            warn!(
                "[{}] Unsupported content type: {}",
                context.session_id, context.content_type
            );
            return Err(Error::UnsupportedContent(context.content_type));
        }

        let session_id = context.session_id.as_str();
        info!("[{session_id}] query={query}");

        if let Some(command) = AdminCommand::parse(query) {
            return Ok(self.run_command(command, session_id).await);
        }

        let turn = self.store.query(query, session_id).await;
        match self.completer.complete(&turn).await {
            Completion::GaveUp { message } => Ok(Reply::error(message)),
            Completion::Reply {
                total_tokens,
                content,
                ..
            } => {
                match self.store.append_reply(turn, &content, total_tokens).await {
                    Ok(()) => {}
                    Err(SessionError::NotFound(id)) => {
                        warn!("[{id}] Session cleared mid-turn, reply not recorded");
                    }
                }
                Ok(Reply::text(content))
            }
        }
    }

    async fn run_command(&self, command: AdminCommand, session_id: &str) -> Reply {
        info!("[{session_id}] Command: {}", command.token());
        match command {
            AdminCommand::ClearSession => self.store.clear(session_id).await,
            AdminCommand::ClearAll => self.store.clear_all().await,
        }
        Reply::info(command.confirmation())
    }
}
