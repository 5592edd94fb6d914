use std::fmt;

/// Kind of content carried by an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    Image,
    Voice,
    File,
    Other,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
            Self::Voice => write!(f, "voice"),
            Self::File => write!(f, "file"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Inbound message metadata supplied by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub content_type: ContentType,
    pub session_id: String,
}

impl Context {
    #[must_use]
    pub fn new(content_type: ContentType, session_id: impl Into<String>) -> Self {
        Self {
            content_type,
            session_id: session_id.into(),
        }
    }

    #[must_use]
    pub fn text(session_id: impl Into<String>) -> Self {
        Self::new(ContentType::Text, session_id)
    }
}
