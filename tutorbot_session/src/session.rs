//! Per-identifier conversation state.

use chrono::{DateTime, Utc};
use tutorbot_core::{ChatMessage, Role};

/// The full history and token usage of one conversation.
///
/// Only [`SessionStore`](crate::SessionStore) mutates a session; callers get
/// read access through the getters.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: String,
    model: String,
    messages: Vec<ChatMessage>,
    cumulative_tokens: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(session_id: String, model: String, system_prompt: Option<&str>) -> Self {
        let now = Utc::now();
        let messages = system_prompt
            .filter(|p| !p.is_empty())
            .map(|p| vec![ChatMessage::system(p)])
            .unwrap_or_default();
        Self {
            session_id,
            model,
            messages,
            cumulative_tokens: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub(crate) fn add_tokens(&mut self, tokens: u32) {
        self.cumulative_tokens = self.cumulative_tokens.saturating_add(u64::from(tokens));
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Messages in chronological order, ready to send as a prompt.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn cumulative_tokens(&self) -> u64 {
        self.cumulative_tokens
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages after the optional leading system prompt.
    #[must_use]
    pub fn dialogue(&self) -> &[ChatMessage] {
        match self.messages.first() {
            Some(first) if first.role == Role::System => &self.messages[1..],
            _ => &self.messages,
        }
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_seeds_history() {
        let session = Session::new("s".into(), "m".into(), Some("be kind"));
        assert_eq!(session.message_count(), 1);
        assert_eq!(session.messages()[0].role, Role::System);
        assert!(session.dialogue().is_empty());
    }

    #[test]
    fn empty_prompt_is_ignored() {
        let session = Session::new("s".into(), "m".into(), Some(""));
        assert!(session.is_empty());
    }

    #[test]
    fn tokens_accumulate() {
        let mut session = Session::new("s".into(), "m".into(), None);
        session.add_tokens(10);
        session.add_tokens(5);
        assert_eq!(session.cumulative_tokens(), 15);
    }
}
