use serde::Serialize;

/// Shape of a supported style literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralKind {
    /// `'...'` or `"..."`
    StringLiteral,
    /// `` `...` `` without `${}` substitutions
    TemplateLiteral,
}

/// A style literal located in a host source file.
///
/// `start_offset` and `end_offset` are byte offsets into the host file and
/// delimit the literal's content, excluding the surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralSpan {
    pub start_offset: usize,
    pub end_offset: usize,
    /// The content exactly as written in the host file (escapes untouched)
    pub raw_text: String,
    /// Opening (and closing) quote character
    pub quote: char,
    pub kind: LiteralKind,
}

impl LiteralSpan {
    /// Byte offset of the opening quote.
    #[must_use]
    pub fn literal_start(&self) -> usize {
        self.start_offset.saturating_sub(self.quote.len_utf8())
    }

    /// Byte offset just past the closing quote.
    #[must_use]
    pub fn literal_end(&self) -> usize {
        self.end_offset + self.quote.len_utf8()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_bounds() {
        let span = LiteralSpan {
            start_offset: 10,
            end_offset: 14,
            raw_text: "a {}".to_string(),
            quote: '`',
            kind: LiteralKind::TemplateLiteral,
        };
        assert_eq!(span.literal_start(), 9);
        assert_eq!(span.literal_end(), 15);
        assert!(!span.is_empty());
    }
}
