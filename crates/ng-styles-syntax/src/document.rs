use crate::css::{CssParser, FragmentOptions, FragmentParser, Root};
use crate::fragment::parse_fragment;
use crate::{LineIndex, Position, Range, Result, StyleError};
use ng_styles_extract::{locate, ExtractConfig, LiteralKind, LiteralSpan};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A host source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub text: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
        }
    }

    /// A file known only by its text
    #[must_use]
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }
}

/// Options for parsing a host file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Path of the host file, used in errors and to pick the host language
    pub from: Option<PathBuf>,
    /// Requested source maps. Fragments are always parsed without them.
    pub map: bool,
    /// Which decorators and property hold styles
    pub extract: ExtractConfig,
}

impl ParseOptions {
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            from: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Verbatim host text around a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentRaws {
    /// Host text between the previous fragment's closing quote (or the start
    /// of the file) and this fragment's opening quote
    pub code_before: String,
    /// For the last fragment, everything after its closing quote. For the
    /// others, the closing quote itself.
    pub code_after: String,
    /// Quote character that opens and closes the literal
    pub quote: char,
}

impl Default for FragmentRaws {
    fn default() -> Self {
        Self {
            code_before: String::new(),
            code_after: String::new(),
            quote: '`',
        }
    }
}

/// One parsed style literal, positioned in the whole host file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleFragment {
    pub root: Root,
    pub raws: FragmentRaws,
    pub kind: LiteralKind,
}

impl StyleFragment {
    /// Whole-file range of the literal's content
    #[must_use]
    pub fn source(&self) -> Range {
        self.root.source
    }
}

/// A host file seen as its style fragments in file order, stitched together
/// by the host text between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeDocument {
    pub input: SourceFile,
    pub nodes: Vec<StyleFragment>,
    pub source: Range,
}

impl CompositeDocument {
    /// Structural dump of the document
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl fmt::Display for CompositeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::stringify(self))
    }
}

/// Parse a host file's style literals with the built-in CSS parser
pub fn parse(text: &str, options: &ParseOptions) -> Result<CompositeDocument> {
    parse_with(&CssParser, text, options)
}

/// Parse a host file's style literals with a custom fragment parser
pub fn parse_with<P: FragmentParser + ?Sized>(
    parser: &P,
    text: &str,
    options: &ParseOptions,
) -> Result<CompositeDocument> {
    let file = SourceFile {
        path: options.from.clone(),
        text: text.to_string(),
    };
    let spans = locate(&file.text, file.path.as_deref(), &options.extract)?;
    compose(parser, file, &spans, options)
}

/// Read and parse a host file from disk
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<CompositeDocument> {
    let file = SourceFile::read(path)?;
    let options = ParseOptions {
        from: Some(path.to_path_buf()),
        ..options.clone()
    };
    let spans = locate(&file.text, file.path.as_deref(), &options.extract)?;
    compose(&CssParser, file, &spans, &options)
}

/// Build the composite document from located literal spans.
///
/// Spans must be ordered and non-overlapping. The first fragment that fails
/// to parse aborts the whole document.
pub fn compose<P: FragmentParser + ?Sized>(
    parser: &P,
    file: SourceFile,
    spans: &[LiteralSpan],
    options: &ParseOptions,
) -> Result<CompositeDocument> {
    let index = LineIndex::new(&file.text);
    let fragment_options = FragmentOptions {
        from: options.from.clone().or_else(|| file.path.clone()),
        map: false,
    };

    let mut cursor = 0;
    let mut nodes = Vec::with_capacity(spans.len());

    for (idx, span) in spans.iter().enumerate() {
        let is_last = idx + 1 == spans.len();

        let code_before = slice(&file.text, cursor, span.literal_start())?;
        let code_after = if is_last {
            slice(&file.text, span.literal_end(), file.text.len())?
        } else {
            slice(&file.text, span.end_offset, span.literal_end())?
        };

        let mut fragment = parse_fragment(parser, &file, &index, span, &fragment_options)?;
        fragment.raws.code_before = code_before.to_string();
        fragment.raws.code_after = code_after.to_string();
        cursor = span.literal_end();

        tracing::debug!(
            index = idx,
            start = fragment.source().start.offset,
            end = fragment.source().end.offset,
            children = fragment.root.nodes.len(),
            "Composed style fragment"
        );
        nodes.push(fragment);
    }

    let source = Range::new(Position::start(), index.last_position());
    Ok(CompositeDocument {
        input: file,
        nodes,
        source,
    })
}

fn slice(text: &str, start: usize, end: usize) -> Result<&str> {
    text.get(start..end)
        .ok_or(StyleError::InvalidSpan { start, end })
}
