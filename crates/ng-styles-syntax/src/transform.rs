//! Fragment-local to whole-file coordinate transforms.
//!
//! All functions are pure: they take values and return new values.

use crate::css::{CssSyntaxError, ErrorInput, FragmentError};
use crate::{CoordinateFrame, LineIndex, Position, Range, SourceFile};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use url::Url;

/// The `:line:column:` part of a `<file>:<line>:<column>: <reason>` message
static MESSAGE_POSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r":\d+:\d+:").unwrap());

/// Frame of a fragment whose content starts at `offset` in the whole file
#[must_use]
pub fn frame_at(index: &LineIndex<'_>, offset: usize) -> CoordinateFrame {
    CoordinateFrame::new(index.position(offset))
}

/// Translate a fragment-local line/column pair. Columns shift only on the
/// fragment's first line.
fn shift(frame: &CoordinateFrame, line: usize, column: usize) -> (usize, usize) {
    let column = if line == 1 {
        column + frame.origin_column - 1
    } else {
        column
    };
    (line + frame.origin_line - 1, column)
}

#[must_use]
pub fn to_global_position(frame: &CoordinateFrame, local: Position) -> Position {
    let (line, column) = shift(frame, local.line, local.column);
    Position::new(line, column, local.offset + frame.origin_offset)
}

/// Translate a whole-file position back into fragment-local coordinates.
///
/// Returns `None` for positions before the fragment's first character.
#[must_use]
pub fn to_local_position(frame: &CoordinateFrame, global: Position) -> Option<Position> {
    let origin = frame.origin();
    if global.offset < origin.offset || global.line < origin.line {
        return None;
    }

    let line = global.line - origin.line + 1;
    let column = if line == 1 {
        global.column.checked_sub(origin.column)? + 1
    } else {
        global.column
    };
    Some(Position::new(line, column, global.offset - origin.offset))
}

/// Translate a fragment-local range and narrow its end onto the node's last
/// character. An empty range collapses onto its start.
#[must_use]
pub fn to_global_range(frame: &CoordinateFrame, local: Range, index: &LineIndex<'_>) -> Range {
    let start = to_global_position(frame, local.start);
    let end = to_global_position(frame, local.end);
    Range::new(start, narrow_end(start, end, index))
}

/// Step an end position back by one character.
///
/// At column 1 the previous character sits on the line above, so its column
/// comes from the whole-file index.
#[must_use]
pub fn narrow_end(start: Position, end: Position, index: &LineIndex<'_>) -> Position {
    if end.offset <= start.offset {
        return start;
    }
    let Some(offset) = index.prev_char_offset(end.offset) else {
        return start;
    };

    if end.column > 1 {
        Position::new(end.line, end.column - 1, offset)
    } else {
        index.position(offset)
    }
}

/// Remap a fragment error into whole-file coordinates.
///
/// Only syntax errors carry positions; anything else passes through.
#[must_use]
pub fn to_global_error(
    error: FragmentError,
    frame: &CoordinateFrame,
    file: &SourceFile,
) -> FragmentError {
    match error {
        FragmentError::Syntax(error) => {
            FragmentError::Syntax(to_global_syntax_error(error, frame, file))
        }
        other => other,
    }
}

#[must_use]
pub fn to_global_syntax_error(
    error: CssSyntaxError,
    frame: &CoordinateFrame,
    file: &SourceFile,
) -> CssSyntaxError {
    let (line, column) = shift(frame, error.line, error.column);
    let (end_line, end_column) = shift_end(frame, error.end_line, error.end_column);
    let path = file.path.as_deref().map(|path| path.display().to_string());

    let message = MESSAGE_POSITION
        .replace(&error.message, format!(":{line}:{column}:").as_str())
        .into_owned();

    let input = {
        let (line, column) = shift(frame, error.input.line, error.input.column);
        let (end_line, end_column) =
            shift_end(frame, error.input.end_line, error.input.end_column);
        ErrorInput {
            url: file.path.as_deref().and_then(file_url).or(error.input.url),
            file: path.clone().or(error.input.file),
            line,
            column,
            end_line,
            end_column,
            css: file.text.clone(),
        }
    };

    CssSyntaxError {
        reason: error.reason,
        message,
        file: path.or(error.file),
        line,
        column,
        end_line,
        end_column,
        offset: error.offset.map(|offset| offset + frame.origin_offset),
        css: file.text.clone(),
        input,
    }
}

fn shift_end(
    frame: &CoordinateFrame,
    line: Option<usize>,
    column: Option<usize>,
) -> (Option<usize>, Option<usize>) {
    match (line, column) {
        (Some(line), Some(column)) => {
            let (line, column) = shift(frame, line, column);
            (Some(line), Some(column))
        }
        (line, column) => (line.map(|line| line + frame.origin_line - 1), column),
    }
}

/// `file://` URL of a host path, resolved against the working directory
fn file_url(path: &Path) -> Option<String> {
    let path = std::path::absolute(path).ok()?;
    Url::from_file_path(path).ok().map(String::from)
}
