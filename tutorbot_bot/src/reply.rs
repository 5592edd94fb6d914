use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Model-generated answer.
    Text,
    /// Acknowledgement of an administrative command.
    Info,
    /// User-facing failure notice.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub content: String,
}

impl Reply {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Info,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            content: content.into(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
