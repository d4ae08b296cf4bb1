use crate::Position;
use serde::Serialize;
use thiserror::Error;

/// A positioned stylesheet syntax error
///
/// Produced fragment-local by the stylesheet parser; by the time it leaves
/// this crate every coordinate is relative to the whole host file.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct CssSyntaxError {
    /// Bare description, e.g. "Unknown word"
    pub reason: String,
    /// `<file>:<line>:<column>: <reason>`
    pub message: String,
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    pub offset: Option<usize>,
    /// Text the coordinates refer to
    #[serde(rename = "source")]
    pub css: String,
    pub input: ErrorInput,
}

/// Echo of the input the error was raised against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInput {
    pub url: Option<String>,
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    #[serde(rename = "source")]
    pub css: String,
}

impl CssSyntaxError {
    #[must_use]
    pub fn new(
        reason: impl Into<String>,
        file: Option<&str>,
        start: Position,
        end: Option<Position>,
        css: &str,
    ) -> Self {
        let reason = reason.into();
        let message = format!(
            "{}:{}:{}: {}",
            file.unwrap_or("<css input>"),
            start.line,
            start.column,
            reason
        );

        Self {
            reason,
            message,
            file: file.map(str::to_string),
            line: start.line,
            column: start.column,
            end_line: end.map(|end| end.line),
            end_column: end.map(|end| end.column),
            offset: Some(start.offset),
            css: css.to_string(),
            input: ErrorInput {
                url: None,
                file: file.map(str::to_string),
                line: start.line,
                column: start.column,
                end_line: end.map(|end| end.line),
                end_column: end.map(|end| end.column),
                css: css.to_string(),
            },
        }
    }
}
