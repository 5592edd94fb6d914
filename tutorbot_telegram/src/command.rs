use tutorbot_bot::AdminCommand;

/// Slash commands handled by the channel itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();

        // Remove bot mention if present (e.g., "/start@my_bot")
        let text = text.split('@').next().unwrap_or(&text).to_string();

        match text.as_str() {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }

    #[must_use]
    pub fn help_text() -> String {
        format!(
            r"
🤖 L-Tutor

命令列表:
/start - 开始使用机器人
/help  - 显示此帮助信息
{}  - 清除你的对话记忆
{}  - 清除所有人的对话记忆

直接发送消息即可开始对话！
",
            AdminCommand::CLEAR_SESSION_TOKEN,
            AdminCommand::CLEAR_ALL_TOKEN
        )
    }

    #[must_use]
    pub const fn welcome_text() -> &'static str {
        r"
👋 欢迎使用 L-Tutor！

我是你的语言学习助手，会记住我们的对话。
发送 /help 查看命令列表。
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_mentions() {
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_from_text(" /HELP "), Some(Command::Help));
        assert_eq!(Command::parse_from_text("/help@ltutor_bot"), Some(Command::Help));
        assert_eq!(Command::parse_from_text("/reset"), None);
        assert_eq!(Command::parse_from_text("#清除记忆"), None);
    }

    #[test]
    fn help_lists_memory_commands() {
        let help = Command::help_text();
        assert!(help.contains(AdminCommand::CLEAR_SESSION_TOKEN));
        assert!(help.contains(AdminCommand::CLEAR_ALL_TOKEN));
    }
}
