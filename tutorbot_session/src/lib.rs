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

//! In-memory session state for the tutor bot.
//!
//! Sessions are created lazily on the first query for an id and live until
//! they are cleared or the process exits. History is never truncated, so a
//! very long conversation will eventually exceed the model's context window.

mod manager;
mod session;

pub use manager::{SessionError, SessionStore, SessionTurn};
pub use session::Session;
