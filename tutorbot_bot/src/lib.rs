#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! L-tutor bot adapter.
//!
//! A [`BotAdapter`] answers one text query at a time: administrative
//! commands are handled locally, everything else is appended to the
//! session history in a shared [`SessionStore`](tutorbot_session::SessionStore)
//! and sent to the configured [`LLMProvider`](tutorbot_core::LLMProvider)
//! with a bounded retry budget.

mod adapter;
mod command;
mod completion;
mod context;
mod error;
mod reply;
mod retry;

pub use adapter::BotAdapter;
pub use command::AdminCommand;
pub use completion::{Completer, Completion, FALLBACK_REPLY, MAX_RETRIES};
pub use context::{ContentType, Context};
pub use error::{Error, Result};
pub use reply::{Reply, ReplyKind};
pub use retry::{
    ErrorClassifier, GaveUp, RetryDecision, RetryUniformly, StatusAwareClassifier,
    retry_with_classifier,
};
