use crate::Position;

/// Offset-to-position conversion over a whole source text.
///
/// This is the single position oracle for the host file. Locator errors,
/// fragment frames, narrowed end positions and the document range all come
/// from here.
///
/// # Example
///
/// ```
/// use ng_styles_extract::{LineIndex, Position};
///
/// let source = "line 1\nline 2\nline 3";
/// let index = LineIndex::new(source);
///
/// assert_eq!(index.position(7), Position::new(2, 1, 7));
/// assert_eq!(index.offset_of(2, 1), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the start of each line
    /// Index 0 is always 0 (start of file)
    /// Index N is the byte offset immediately after the Nth '\n' character
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Build a line index from source text
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(idx, _)| idx + 1),
        );

        Self { text, line_starts }
    }

    /// Convert a byte offset to a 1-based line/column position
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character snap back to the character's start.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = self.floor_char_boundary(offset);

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = self.text[line_start..offset].chars().count() + 1;
        Position::new(line + 1, column, offset)
    }

    /// Convert a 1-based line/column position to a byte offset
    ///
    /// Returns `None` if the line does not exist or the column runs past it.
    #[must_use]
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let line_start = *self.line_starts.get(line.checked_sub(1)?)?;
        let line_end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len());

        let skip = column.checked_sub(1)?;
        let line_text = &self.text[line_start..line_end];
        if skip == line_text.chars().count() {
            return Some(line_end);
        }
        line_text
            .char_indices()
            .nth(skip)
            .map(|(idx, _)| line_start + idx)
    }

    /// Byte offset of the character before `offset`, or `None` at the start
    #[must_use]
    pub fn prev_char_offset(&self, offset: usize) -> Option<usize> {
        let offset = self.floor_char_boundary(offset);
        self.text[..offset]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    /// Position of the last character, or the start for empty text
    #[must_use]
    pub fn last_position(&self) -> Position {
        self.prev_char_offset(self.text.len())
            .map_or_else(Position::start, |offset| self.position(offset))
    }

    /// Get the number of lines in the indexed text
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn floor_char_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position::start());
        assert_eq!(index.last_position(), Position::start());
        assert_eq!(index.prev_char_offset(0), None);
    }

    #[test]
    fn test_multiple_lines() {
        let source = "line 1\nline 2\nline 3";
        let index = LineIndex::new(source);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(0), Position::new(1, 1, 0));
        assert_eq!(index.position(6), Position::new(1, 7, 6));
        assert_eq!(index.position(7), Position::new(2, 1, 7));
        assert_eq!(index.position(10), Position::new(2, 4, 10));
        assert_eq!(index.position(14), Position::new(3, 1, 14));
    }

    #[test]
    fn test_offset_of() {
        let source = "line 1\nline 2\nline 3";
        let index = LineIndex::new(source);

        assert_eq!(index.offset_of(1, 1), Some(0));
        assert_eq!(index.offset_of(2, 1), Some(7));
        assert_eq!(index.offset_of(2, 5), Some(11));
        assert_eq!(index.offset_of(3, 7), Some(20));
        assert_eq!(index.offset_of(3, 8), None);
        assert_eq!(index.offset_of(4, 1), None);
        assert_eq!(index.offset_of(0, 1), None);
    }

    #[test]
    fn test_utf8_characters() {
        // "Hello 世界" where 世 and 界 are 3 bytes each
        let source = "Hello 世界\nSecond line";
        let index = LineIndex::new(source);

        assert_eq!(index.position(9), Position::new(1, 8, 9));
        assert_eq!(index.position(13), Position::new(2, 1, 13));
        // Inside 界 snaps back to its start
        assert_eq!(index.position(10), Position::new(1, 8, 9));
        assert_eq!(index.prev_char_offset(12), Some(9));
    }

    #[test]
    fn test_last_position() {
        let index = LineIndex::new("a {}\n");
        assert_eq!(index.last_position(), Position::new(1, 5, 4));

        let index = LineIndex::new("ab");
        assert_eq!(index.last_position(), Position::new(1, 2, 1));
    }

    #[test]
    fn test_windows_line_endings() {
        let source = "line 1\r\nline 2\r\nline 3";
        let index = LineIndex::new(source);

        assert_eq!(index.position(8), Position::new(2, 1, 8));
        assert_eq!(index.position(6), Position::new(1, 7, 6));
        assert_eq!(index.offset_of(3, 1), Some(16));
    }

    #[test]
    fn test_roundtrip() {
        let source = "fn main() {\n    println!(\"Hello\");\n}\n";
        let index = LineIndex::new(source);

        for offset in [0, 5, 12, 16, 35, 37] {
            let pos = index.position(offset);
            assert_eq!(
                index.offset_of(pos.line, pos.column),
                Some(offset),
                "offset {offset} -> position {pos:?}",
            );
        }
    }
}
