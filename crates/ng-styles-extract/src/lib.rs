mod error;
mod extractor;
mod language;
mod line_index;
mod literal;
mod position;

pub use error::{ExtractError, Result};
pub use extractor::{locate, locate_file, ExtractConfig};
pub use language::Language;
pub use line_index::LineIndex;
pub use literal::{LiteralKind, LiteralSpan};
pub use position::Position;
