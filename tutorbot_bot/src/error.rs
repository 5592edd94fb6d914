use thiserror::Error;

use crate::ContentType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(ContentType),
}
