use crate::css::{FragmentError, FragmentOptions, FragmentParser};
use crate::transform::{frame_at, to_global_error, to_global_range};
use crate::{FragmentRaws, LineIndex, SourceFile, StyleFragment};
use ng_styles_extract::LiteralSpan;

/// Parse one style literal and move its tree into whole-file coordinates.
///
/// The returned fragment has its quote set; `code_before`/`code_after` are
/// left for the composer. Errors come back already remapped.
pub fn parse_fragment<P: FragmentParser + ?Sized>(
    parser: &P,
    file: &SourceFile,
    index: &LineIndex<'_>,
    span: &LiteralSpan,
    options: &FragmentOptions,
) -> Result<StyleFragment, FragmentError> {
    let frame = frame_at(index, span.start_offset);
    tracing::trace!(?frame, start = span.start_offset, "Parsing style fragment");

    let options = FragmentOptions {
        map: false,
        ..options.clone()
    };

    let root = parser.parse(&span.raw_text, &options).map_err(|error| {
        let error = to_global_error(error, &frame, file);
        tracing::debug!(%error, "Style fragment failed to parse");
        error
    })?;

    let root = root.map_ranges(&|range| to_global_range(&frame, range, index));

    Ok(StyleFragment {
        root,
        raws: FragmentRaws {
            quote: span.quote,
            ..FragmentRaws::default()
        },
        kind: span.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::{CssParser, Node, Root};
    use crate::Position;
    use ng_styles_extract::LiteralKind;

    fn span_in(text: &str, content: &str, quote: char) -> LiteralSpan {
        let start_offset = text.find(content).unwrap();
        LiteralSpan {
            start_offset,
            end_offset: start_offset + content.len(),
            raw_text: content.to_string(),
            quote,
            kind: LiteralKind::StringLiteral,
        }
    }

    #[test]
    fn test_every_node_is_remapped() {
        let text = "@Component({\n  styles: [`.a {\n  color: red;\n}`],\n})\nclass A {}\n";
        let file = SourceFile::new("a.component.ts", text);
        let index = LineIndex::new(text);
        let span = span_in(text, ".a {\n  color: red;\n}", '`');

        let fragment =
            parse_fragment(&CssParser, &file, &index, &span, &FragmentOptions::default()).unwrap();

        assert_eq!(fragment.raws.quote, '`');
        assert_eq!(fragment.source().start, Position::new(2, 13, 25));
        assert_eq!(fragment.source().end, Position::new(4, 1, 44));

        let Node::Rule(rule) = &fragment.root.nodes[0] else {
            panic!("expected rule");
        };
        assert_eq!(rule.source.start, Position::new(2, 13, 25));
        assert_eq!(rule.source.end, Position::new(4, 1, 44));

        let decl = rule.nodes[0].source();
        assert_eq!(decl.start, Position::new(3, 3, 32));
        assert_eq!(decl.end, Position::new(3, 13, 42));
        assert_eq!(&text[decl.start.offset..=decl.end.offset], "color: red;");
    }

    #[test]
    fn test_syntax_error_is_remapped_before_returning() {
        let text = "x = { styles: '.a { b }' };";
        let file = SourceFile::new("x.ts", text);
        let index = LineIndex::new(text);
        let span = span_in(text, ".a { b }", '\'');

        let err = parse_fragment(&CssParser, &file, &index, &span, &FragmentOptions::default())
            .unwrap_err();
        let FragmentError::Syntax(err) = err else {
            panic!("expected syntax error");
        };
        assert_eq!((err.line, err.column), (1, 21));
        assert_eq!(err.css, text);
    }

    #[test]
    fn test_parser_always_sees_map_disabled() {
        struct MapCheck;

        impl FragmentParser for MapCheck {
            fn parse(&self, _text: &str, options: &FragmentOptions) -> Result<Root, FragmentError> {
                if options.map {
                    return Err(FragmentError::Other("map requested".to_string()));
                }
                Ok(Root::default())
            }

            fn stringify(&self, _root: &Root) -> String {
                String::new()
            }
        }

        let text = "'a'";
        let file = SourceFile::new("x.ts", text);
        let index = LineIndex::new(text);
        let span = span_in(text, "a", '\'');
        let options = FragmentOptions {
            from: None,
            map: true,
        };

        assert!(parse_fragment(&MapCheck, &file, &index, &span, &options).is_ok());
    }
}
