use crate::{Command, Error, Result, TelegramBot};
use teloxide::{
    requests::Requester,
    types::{ChatAction, Message},
};
use tracing::{info, warn};
use tutorbot_bot::{ContentType, Context};

fn content_type(msg: &Message) -> ContentType {
    if msg.text().is_some() {
        ContentType::Text
    } else if msg.photo().is_some() {
        ContentType::Image
    } else if msg.voice().is_some() {
        ContentType::Voice
    } else if msg.document().is_some() {
        ContentType::File
    } else {
        ContentType::Other
    }
}

/// Only text gets an answer, so only text gets the typing indicator.
fn shows_typing(kind: ContentType) -> bool {
    kind == ContentType::Text
}

/// Handle bot commands
async fn handle_command(bot: &TelegramBot, msg: &Message, cmd: Command) -> Result<()> {
    info!("[{}] Command: {cmd:?}", msg.chat.id.0);
    let text = match cmd {
        Command::Start => Command::welcome_text().to_string(),
        Command::Help => Command::help_text(),
    };
    bot.bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Handle any incoming message
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;
    if !bot.is_allowed(chat_id) {
        warn!("Ignoring message from unauthorized chat {chat_id}");
        return Err(Error::Unauthorized(chat_id));
    }

    let query = msg.text().or_else(|| msg.caption()).unwrap_or_default();
    if let Some(cmd) = Command::parse_from_text(query) {
        return handle_command(&bot, &msg, cmd).await;
    }

    let kind = content_type(&msg);
    if shows_typing(kind) {
        bot.bot
            .send_chat_action(msg.chat.id, ChatAction::Typing)
            .await?;
    }
    let context = Context::new(kind, chat_id.to_string());

    match bot.adapter.reply(query, &context).await {
        Ok(reply) => {
            info!("[{chat_id}] Reply ({:?}): {}", reply.kind, reply.content);
            bot.bot.send_message(msg.chat.id, reply.content).await?;
            Ok(())
        }
        Err(tutorbot_bot::Error::UnsupportedContent(kind)) => {
            info!("[{chat_id}] No reply for {kind} message");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_indicator_only_for_text() {
        assert!(shows_typing(ContentType::Text));
        for kind in [
            ContentType::Image,
            ContentType::Voice,
            ContentType::File,
            ContentType::Other,
        ] {
            assert!(!shows_typing(kind), "{kind} should not show typing");
        }
    }
}
