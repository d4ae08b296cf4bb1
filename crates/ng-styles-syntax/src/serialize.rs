use crate::css::{CssParser, FragmentParser};
use crate::CompositeDocument;

/// Render a document back to host source text with the built-in CSS
/// stringifier
#[must_use]
pub fn stringify(doc: &CompositeDocument) -> String {
    stringify_with(&CssParser, doc)
}

/// Render a document back to host source text.
///
/// Each fragment is written as its `code_before`, the quote, the rendered
/// stylesheet, and the quote again; the last fragment is followed by its
/// `code_after`. A document without fragments is its original text.
#[must_use]
pub fn stringify_with<P: FragmentParser + ?Sized>(parser: &P, doc: &CompositeDocument) -> String {
    if doc.nodes.is_empty() {
        return doc.input.text.clone();
    }

    let mut out = String::with_capacity(doc.input.text.len());
    for (idx, fragment) in doc.nodes.iter().enumerate() {
        out.push_str(&fragment.raws.code_before);
        out.push(fragment.raws.quote);
        out.push_str(&parser.stringify(&fragment.root));
        out.push(fragment.raws.quote);
        if idx + 1 == doc.nodes.len() {
            out.push_str(&fragment.raws.code_after);
        }
    }
    out
}
