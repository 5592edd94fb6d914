//! Interactive conversation through the bot adapter on stdin/stdout.

use std::io::Write;
use tracing::info;
use tutorbot_bot::{BotAdapter, Context, ReplyKind};
use tutorbot_config::Config;
use uuid::Uuid;

use super::build_adapter;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Session to talk in (a fresh `cli:<uuid>` id if not provided)
    pub session_id: Option<String>,
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let adapter = build_adapter(&config, input.model);

        let session_id = input
            .session_id
            .unwrap_or_else(|| format!("cli:{}", Uuid::now_v7()));
        let context = Context::text(session_id.clone());
        info!("Starting chat session: {session_id}");

        if let Some(msg) = input.message {
            let reply = adapter.reply(&msg, &context).await?;
            println!("{reply}");
            return Ok(());
        }

        run_interactive(&adapter, &context).await
    }
}

async fn run_interactive(adapter: &BotAdapter, context: &Context) -> anyhow::Result<()> {
    println!("=== L-Tutor session: {} ===", context.session_id);
    println!("Type 'exit', 'quit', or Ctrl+C to end the session.\n");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if matches!(input, "exit" | "quit" | "q") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let reply = adapter.reply(input, context).await?;
        match reply.kind {
            ReplyKind::Text => println!("\n{reply}\n"),
            ReplyKind::Info => println!("\n[info] {reply}\n"),
            ReplyKind::Error => eprintln!("\n[error] {reply}\n"),
        }
    }

    if let Some(session) = adapter.store().get(&context.session_id).await {
        info!(
            "Session ended: {} messages, {} tokens",
            session.message_count(),
            session.cumulative_tokens()
        );
    }
    Ok(())
}
