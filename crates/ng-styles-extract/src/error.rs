use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// A style value that is neither a string literal nor a template literal
    /// without substitutions. Fatal for the whole file.
    #[error("Unsupported style literal type in {path}:{line}:{column}: {kind}")]
    UnsupportedLiteralShape {
        path: String,
        line: usize,
        column: usize,
        kind: String,
    },
}
