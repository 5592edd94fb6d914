//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::sync::Arc;
use tracing::info;
use tutorbot_bot::{BotAdapter, ErrorClassifier, RetryUniformly, StatusAwareClassifier};
use tutorbot_config::{Config, RetryPolicy};
use tutorbot_core::LLMProvider;
use tutorbot_providers::GroqProvider;
use tutorbot_session::SessionStore;

mod chat;
mod info;
mod init;
mod telegram;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

fn classifier_for(policy: RetryPolicy) -> Arc<dyn ErrorClassifier> {
    match policy {
        RetryPolicy::Uniform => Arc::new(RetryUniformly),
        RetryPolicy::StatusAware => Arc::new(StatusAwareClassifier),
    }
}

/// Wire provider, session store and retry policy from config.
///
/// `model` overrides the configured model for every session in the store.
fn build_adapter(config: &Config, model: Option<String>) -> BotAdapter {
    let groq = &config.providers.groq;
    let mut provider = GroqProvider::new(groq.api_key.clone());
    if let Some(base_url) = &groq.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    let model = model.unwrap_or_else(|| config.bot.model.clone());
    info!(
        "Building bot adapter: model={model}, retry_policy={:?}",
        config.bot.retry_policy
    );

    let store = Arc::new(SessionStore::new(model).with_system_prompt(config.bot.system_prompt.clone()));
    let provider: Arc<dyn LLMProvider> = Arc::new(provider);

    BotAdapter::new(provider, store, config.generation_params())
        .with_classifier(classifier_for(config.bot.retry_policy))
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// adding a command only requires a new implementation of this trait.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
