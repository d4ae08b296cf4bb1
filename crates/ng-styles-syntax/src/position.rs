use ng_styles_extract::Position;
use serde::Serialize;

/// Two-point span in a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Whole-file position of a fragment's first content character.
///
/// Every fragment-local position is translated through this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateFrame {
    pub origin_line: usize,
    pub origin_column: usize,
    pub origin_offset: usize,
}

impl CoordinateFrame {
    #[must_use]
    pub const fn new(origin: Position) -> Self {
        Self {
            origin_line: origin.line,
            origin_column: origin.column,
            origin_offset: origin.offset,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(self.origin_line, self.origin_column, self.origin_offset)
    }
}
