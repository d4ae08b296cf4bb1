//! Stylesheet fragment parsing.
//!
//! The composer only talks to [`FragmentParser`]; [`CssParser`] is the
//! built-in lossless implementation.

mod ast;
mod error;
mod parser;
mod stringify;

pub use ast::{
    AtRule, AtRuleRaws, BlockRaws, Comment, CommentRaws, DeclRaws, Declaration, Node, Root,
    RootRaws, Rule,
};
pub use error::{CssSyntaxError, ErrorInput};
pub use stringify::stringify;

use std::path::PathBuf;
use thiserror::Error;

/// Options passed to a fragment parser for one fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentOptions {
    /// Host file the fragment belongs to, used in error messages
    pub from: Option<PathBuf>,
    /// Source map generation; fragments are always parsed with this off
    pub map: bool,
}

/// Failure of a fragment parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// Positioned syntax error, remapped to host-file coordinates on the way out
    #[error(transparent)]
    Syntax(#[from] CssSyntaxError),

    /// Any other failure, passed through untouched
    #[error("{0}")]
    Other(String),
}

/// A stylesheet parser that can turn fragment text into a [`Root`] and back.
///
/// Implementations report fragment-local positions with node ends pointing
/// one past the node's last character. `stringify(parse(text))` must equal
/// `text` for the composed document to round-trip.
pub trait FragmentParser {
    fn parse(&self, text: &str, options: &FragmentOptions) -> Result<Root, FragmentError>;

    fn stringify(&self, root: &Root) -> String;
}

/// Built-in lossless CSS parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl FragmentParser for CssParser {
    fn parse(&self, text: &str, options: &FragmentOptions) -> Result<Root, FragmentError> {
        let file = options.from.as_ref().map(|path| path.display().to_string());
        let root = parser::Parser::new(text, file.as_deref()).parse()?;
        Ok(root)
    }

    fn stringify(&self, root: &Root) -> String {
        stringify(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_parser_reports_file_in_message() {
        let options = FragmentOptions {
            from: Some(PathBuf::from("/src/app.component.ts")),
            map: false,
        };
        let err = CssParser.parse("a { b }", &options).unwrap_err();

        let FragmentError::Syntax(err) = err else {
            panic!("expected syntax error");
        };
        assert_eq!(err.message, "/src/app.component.ts:1:5: Unknown word");
        assert_eq!(err.file.as_deref(), Some("/src/app.component.ts"));
    }

    #[test]
    fn test_css_parser_round_trips() {
        let css = "\n  .a { color: red; }\n";
        let root = CssParser.parse(css, &FragmentOptions::default()).unwrap();
        assert_eq!(CssParser.stringify(&root), css);
    }
}
