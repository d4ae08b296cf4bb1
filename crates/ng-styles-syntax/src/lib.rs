//! Component style literals as one stylesheet document.
//!
//! Style literals found in component decorator metadata are parsed as
//! stylesheets, every position is moved into whole-file coordinates, and the
//! fragments are stitched back together with the host text between them so
//! that an unedited document stringifies to the original file.
//!
//! ```
//! use ng_styles_syntax::{parse, stringify, ParseOptions};
//!
//! let source = "@Component({ styles: ['a { color: red; }'] })\nclass A {}\n";
//! let doc = parse(source, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(doc.nodes.len(), 1);
//! assert_eq!(stringify(&doc), source);
//! ```

pub mod css;
mod document;
mod error;
mod fragment;
mod position;
mod serialize;
pub mod transform;

pub use document::{
    compose, parse, parse_file, parse_with, CompositeDocument, FragmentRaws, ParseOptions,
    SourceFile, StyleFragment,
};
pub use error::{Result, StyleError};
pub use fragment::parse_fragment;
pub use position::{CoordinateFrame, Range};
pub use serialize::{stringify, stringify_with};

// Re-export the extraction surface
pub use ng_styles_extract::{
    ExtractConfig, ExtractError, LineIndex, LiteralKind, LiteralSpan, Position,
};
