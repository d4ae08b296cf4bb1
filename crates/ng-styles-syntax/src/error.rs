use crate::css::{CssSyntaxError, FragmentError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StyleError>;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Extraction error: {0}")]
    Extract(#[from] ng_styles_extract::ExtractError),

    /// Stylesheet syntax error, already in whole-file coordinates
    #[error(transparent)]
    Syntax(#[from] CssSyntaxError),

    #[error("Fragment parse error: {0}")]
    Fragment(String),

    #[error("Literal span {start}..{end} does not fit the source text")]
    InvalidSpan { start: usize, end: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FragmentError> for StyleError {
    fn from(error: FragmentError) -> Self {
        match error {
            FragmentError::Syntax(error) => StyleError::Syntax(error),
            FragmentError::Other(message) => StyleError::Fragment(message),
        }
    }
}
