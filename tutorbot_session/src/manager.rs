use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use tutorbot_core::ChatMessage;

use crate::Session;

type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Exclusive access to one session for the duration of a turn.
///
/// Created by [`SessionStore::query`]; a second turn for the same session id
/// waits until this one is dropped or handed to
/// [`SessionStore::append_reply`].
pub struct SessionTurn {
    guard: OwnedMutexGuard<Session>,
}

impl Deref for SessionTurn {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.guard
    }
}

/// In-memory conversation store keyed by session id.
///
/// The map lock is only held for lookups and swaps. Each session has its own
/// mutex, held by the in-flight [`SessionTurn`].
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
    model: String,
    system_prompt: Option<String>,
}

impl SessionStore {
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        info!("SessionStore initialized for model: {model}");
        Self {
            sessions: Mutex::new(HashMap::new()),
            model,
            system_prompt: None,
        }
    }

    /// Seed every new session with a system message.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Append a user message to `session_id`, creating the session if needed.
    ///
    /// The returned turn holds the session lock until it is dropped or passed
    /// to [`append_reply`](Self::append_reply).
    pub async fn query(&self, text: &str, session_id: &str) -> SessionTurn {
        let handle = {
            let mut sessions = self.sessions.lock().await;
            Arc::clone(sessions.entry(session_id.to_string()).or_insert_with(|| {
                info!("Creating session: {session_id}");
                Arc::new(Mutex::new(Session::new(
                    session_id.to_string(),
                    self.model.clone(),
                    self.system_prompt.as_deref(),
                )))
            }))
        };

        let mut guard = handle.lock_owned().await;
        guard.add_message(ChatMessage::user(text));
        debug!(
            "Session {session_id}: appended query, {} messages",
            guard.message_count()
        );
        SessionTurn { guard }
    }

    /// Record the assistant reply for a turn and add its token usage.
    ///
    /// Returns [`SessionError::NotFound`] if the session was cleared while
    /// the turn was in flight; the store is left untouched in that case.
    pub async fn append_reply(
        &self,
        turn: SessionTurn,
        text: &str,
        token_count: u32,
    ) -> Result<(), SessionError> {
        let SessionTurn { mut guard } = turn;
        let sessions = self.sessions.lock().await;

        let live = sessions
            .get(guard.session_id())
            .is_some_and(|handle| Arc::ptr_eq(handle, OwnedMutexGuard::mutex(&guard)));
        if !live {
            warn!(
                "Session {} was cleared before its reply arrived",
                guard.session_id()
            );
            return Err(SessionError::NotFound(guard.session_id().to_string()));
        }

        guard.add_message(ChatMessage::assistant(text));
        guard.add_tokens(token_count);
        debug!(
            "Session {}: appended reply, cumulative_tokens={}",
            guard.session_id(),
            guard.cumulative_tokens()
        );
        Ok(())
    }

    /// Remove a session entirely. Clearing an unknown id is a no-op.
    pub async fn clear(&self, session_id: &str) {
        let removed = self.sessions.lock().await.remove(session_id);
        if removed.is_some() {
            info!("Cleared session: {session_id}");
        }
    }

    /// Remove every session in one swap of the map.
    pub async fn clear_all(&self) {
        let previous = std::mem::take(&mut *self.sessions.lock().await);
        info!("Cleared all sessions ({} removed)", previous.len());
    }

    /// Snapshot of a session. Waits for any in-flight turn on it.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let handle = self.sessions.lock().await.get(session_id).cloned()?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub async fn session_ids(&self) -> Vec<String> {
        self.sessions.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
