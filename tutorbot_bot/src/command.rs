/// Chat commands that manage session memory instead of reaching the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    ClearSession,
    ClearAll,
}

impl AdminCommand {
    pub const CLEAR_SESSION_TOKEN: &'static str = "#清除记忆";
    pub const CLEAR_ALL_TOKEN: &'static str = "#清除所有";

    /// Exact, case-sensitive match against the whole query.
    #[must_use]
    pub fn parse(query: &str) -> Option<Self> {
        match query {
            Self::CLEAR_SESSION_TOKEN => Some(Self::ClearSession),
            Self::CLEAR_ALL_TOKEN => Some(Self::ClearAll),
            _ => None,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::ClearSession => Self::CLEAR_SESSION_TOKEN,
            Self::ClearAll => Self::CLEAR_ALL_TOKEN,
        }
    }

    #[must_use]
    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::ClearSession => "记忆已清除",
            Self::ClearAll => "所有人记忆已清除",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_tokens_only() {
        assert_eq!(AdminCommand::parse("#清除记忆"), Some(AdminCommand::ClearSession));
        assert_eq!(AdminCommand::parse("#清除所有"), Some(AdminCommand::ClearAll));
        assert_eq!(AdminCommand::parse(" #清除记忆"), None);
        assert_eq!(AdminCommand::parse("#清除记忆吧"), None);
        assert_eq!(AdminCommand::parse("hello"), None);
    }

    #[test]
    fn token_round_trips() {
        for cmd in [AdminCommand::ClearSession, AdminCommand::ClearAll] {
            assert_eq!(AdminCommand::parse(cmd.token()), Some(cmd));
        }
    }
}
