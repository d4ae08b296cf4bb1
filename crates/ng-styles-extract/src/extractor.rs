use crate::{ExtractError, Language, LineIndex, LiteralKind, LiteralSpan, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use swc_core::common::{BytePos, Span, Spanned};
use swc_core::ecma::ast::{
    CallExpr, Callee, Class, Decorator, Expr, ExprOrSpread, Lit, MemberProp, Module, ObjectLit,
    Prop, PropName, PropOrSpread,
};
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};

/// Byte position the host source is loaded at; swc reserves `BytePos(0)`.
const START_POS: BytePos = BytePos(1);

/// Configuration for style literal extraction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Class decorators whose metadata carries styles (default: ["Component"])
    /// Matches `@Component({...})` and `@core.Component({...})`
    pub decorators: Vec<String>,

    /// Metadata property holding the styles (default: "styles")
    /// Matches: `styles: "..."` or `styles: ["...", `...`]`
    pub property: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            decorators: vec!["Component".to_string()],
            property: "styles".to_string(),
        }
    }
}

/// Locate style literals in a file on disk
pub fn locate_file(path: &Path, config: &ExtractConfig) -> Result<Vec<LiteralSpan>> {
    if Language::from_path(path).is_none() {
        return Err(ExtractError::UnsupportedFileType(path.to_path_buf()));
    }

    let source = fs::read_to_string(path)?;
    locate(&source, Some(path), config)
}

/// Locate every style literal assigned to the configured metadata property of
/// a configured decorator, on every class in `source`.
///
/// The result is ordered by `start_offset`. Any style value that is not a
/// supported literal fails the whole call; no partial result is returned.
pub fn locate(
    source: &str,
    path: Option<&Path>,
    config: &ExtractConfig,
) -> Result<Vec<LiteralSpan>> {
    let label = path.map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
    let module = parse_module(source, &label, Language::detect(path))?;

    let mut collector = StyleCollector {
        source,
        index: LineIndex::new(source),
        path: &label,
        config,
        spans: Vec::new(),
        error: None,
    };
    module.visit_with(&mut collector);

    if let Some(error) = collector.error {
        return Err(error);
    }

    let mut spans = collector.spans;
    spans.sort_by_key(|span| span.start_offset);
    tracing::debug!(path = %label, count = spans.len(), "Located style literals");
    Ok(spans)
}

fn parse_module(source: &str, path: &str, language: Language) -> Result<Module> {
    let syntax = match language {
        Language::TypeScript => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Language::JavaScript => Syntax::Es(EsSyntax {
            decorators: true,
            decorators_before_export: true,
            ..Default::default()
        }),
    };

    let end = end_pos(source.len()).ok_or_else(|| ExtractError::Parse {
        path: path.to_string(),
        message: format!("source of {} bytes is too large", source.len()),
    })?;
    let mut parser = Parser::new(syntax, StringInput::new(source, START_POS, end), None);

    let module = parser.parse_module().map_err(|err| ExtractError::Parse {
        path: path.to_string(),
        message: err.kind().msg().to_string(),
    })?;

    let recovered = parser.take_errors();
    if !recovered.is_empty() {
        tracing::debug!(path, error_count = recovered.len(), "Recovered from host parse errors");
    }

    Ok(module)
}

/// Byte position just past a source of `len` bytes loaded at `START_POS`
fn end_pos(len: usize) -> Option<BytePos> {
    let len = u32::try_from(len).ok()?;
    START_POS.0.checked_add(len).map(BytePos)
}

/// Walks classes and records style literals of matching decorators
struct StyleCollector<'a> {
    source: &'a str,
    index: LineIndex<'a>,
    path: &'a str,
    config: &'a ExtractConfig,
    spans: Vec<LiteralSpan>,
    error: Option<ExtractError>,
}

impl Visit for StyleCollector<'_> {
    fn visit_class(&mut self, class: &Class) {
        if self.error.is_some() {
            return;
        }

        for decorator in &class.decorators {
            if let Err(error) = self.collect_decorator(decorator) {
                self.error = Some(error);
                return;
            }
        }

        class.visit_children_with(self);
    }
}

impl StyleCollector<'_> {
    fn collect_decorator(&mut self, decorator: &Decorator) -> Result<()> {
        let Some(call) = self.matching_call(decorator) else {
            return Ok(());
        };

        for arg in &call.args {
            if arg.spread.is_some() {
                continue;
            }
            let Expr::Object(object) = &*arg.expr else {
                continue;
            };
            if let Some(value) = self.property_value(object) {
                self.collect_value(value)?;
            }
        }

        Ok(())
    }

    fn matching_call<'d>(&self, decorator: &'d Decorator) -> Option<&'d CallExpr> {
        let Expr::Call(call) = &*decorator.expr else {
            return None;
        };
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };

        let name: &str = match &**callee {
            Expr::Ident(ident) => &*ident.sym,
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(ident) => &*ident.sym,
                _ => return None,
            },
            _ => return None,
        };

        self.config
            .decorators
            .iter()
            .any(|decorator| decorator == name)
            .then_some(call)
    }

    /// Initializer of the first property named like the configured one.
    /// Shorthand properties match by name but carry no literal.
    fn property_value<'o>(&self, object: &'o ObjectLit) -> Option<&'o Expr> {
        let prop = object.props.iter().find_map(|prop| match prop {
            PropOrSpread::Prop(prop) if self.is_style_property(prop) => Some(&**prop),
            _ => None,
        })?;

        match prop {
            Prop::KeyValue(kv) => Some(&*kv.value),
            _ => None,
        }
    }

    fn is_style_property(&self, prop: &Prop) -> bool {
        let name = match prop {
            Prop::KeyValue(kv) => match &kv.key {
                PropName::Ident(ident) => ident.sym.to_string(),
                PropName::Str(s) => self.unquoted(s.span).to_string(),
                _ => return false,
            },
            Prop::Shorthand(ident) => ident.sym.to_string(),
            _ => return false,
        };
        name == self.config.property
    }

    fn collect_value(&mut self, value: &Expr) -> Result<()> {
        let Expr::Array(array) = value else {
            return self.collect_literal(value);
        };

        for element in &array.elems {
            match element {
                Some(ExprOrSpread { spread: None, expr }) => self.collect_literal(expr)?,
                Some(ExprOrSpread {
                    spread: Some(span), ..
                }) => return Err(self.unsupported(*span, "spread element")),
                None => return Err(self.unsupported(array.span, "omitted array element")),
            }
        }

        Ok(())
    }

    fn collect_literal(&mut self, expr: &Expr) -> Result<()> {
        let span = match expr {
            Expr::Lit(Lit::Str(s)) => self.literal_span(s.span, LiteralKind::StringLiteral),
            Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
                self.literal_span(tpl.span, LiteralKind::TemplateLiteral)
            }
            other => return Err(self.unsupported(other.span(), expr_kind(other))),
        };

        let span = span.ok_or_else(|| self.unsupported(expr.span(), "malformed literal"))?;
        tracing::debug!(
            path = self.path,
            start = span.start_offset,
            end = span.end_offset,
            kind = ?span.kind,
            "Found style literal"
        );
        self.spans.push(span);
        Ok(())
    }

    fn literal_span(&self, span: Span, kind: LiteralKind) -> Option<LiteralSpan> {
        let lo = self.offset(span.lo);
        let hi = self.offset(span.hi);
        let quote = self.source.get(lo..)?.chars().next()?;

        let start_offset = lo + quote.len_utf8();
        let end_offset = hi.checked_sub(quote.len_utf8())?;
        let raw_text = self.source.get(start_offset..end_offset)?.to_string();

        Some(LiteralSpan {
            start_offset,
            end_offset,
            raw_text,
            quote,
            kind,
        })
    }

    fn unquoted(&self, span: Span) -> &str {
        let text = self
            .source
            .get(self.offset(span.lo)..self.offset(span.hi))
            .unwrap_or_default();
        let mut chars = text.chars();
        chars.next();
        chars.next_back();
        chars.as_str()
    }

    fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(START_POS.0) as usize
    }

    fn unsupported(&self, span: Span, kind: &str) -> ExtractError {
        let position = self.index.position(self.offset(span.lo));
        ExtractError::UnsupportedLiteralShape {
            path: self.path.to_string(),
            line: position.line,
            column: position.column,
            kind: kind.to_string(),
        }
    }
}

fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident(_) => "identifier",
        Expr::Tpl(_) => "template literal with substitutions",
        Expr::TaggedTpl(_) => "tagged template",
        Expr::Call(_) => "call expression",
        Expr::Member(_) => "member expression",
        Expr::Bin(_) => "binary expression",
        Expr::Array(_) => "nested array",
        Expr::Lit(_) => "non-string literal",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate_ts(source: &str) -> Result<Vec<LiteralSpan>> {
        locate(source, None, &ExtractConfig::default())
    }

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.decorators, vec!["Component".to_string()]);
        assert_eq!(config.property, "styles");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ExtractConfig = serde_json::from_str(r#"{"decorators": ["Directive"]}"#).unwrap();
        assert_eq!(config.decorators, vec!["Directive".to_string()]);
        assert_eq!(config.property, "styles");
    }

    #[test]
    fn test_single_string_literal() {
        let source = "@Component({ styles: \".a { color: red; }\" })\nclass A {}\n";
        let spans = locate_ts(source).unwrap();

        assert_eq!(spans.len(), 1);
        let span = &spans[0];
        assert_eq!(span.raw_text, ".a { color: red; }");
        assert_eq!(span.quote, '"');
        assert_eq!(span.kind, LiteralKind::StringLiteral);
        assert_eq!(&source[span.start_offset..span.end_offset], span.raw_text);
        assert_eq!(&source[span.literal_start()..span.start_offset], "\"");
    }

    #[test]
    fn test_array_is_flattened_in_order() {
        let source = "@Component({\n  styles: ['.a {}', `\n.b {}\n`],\n})\nexport class A {}\n";
        let spans = locate_ts(source).unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].raw_text, ".a {}");
        assert_eq!(spans[0].quote, '\'');
        assert_eq!(spans[1].raw_text, "\n.b {}\n");
        assert_eq!(spans[1].quote, '`');
        assert_eq!(spans[1].kind, LiteralKind::TemplateLiteral);
        assert!(spans[0].end_offset < spans[1].start_offset);
    }

    #[test]
    fn test_no_styles_property() {
        let source = "@Component({ selector: 'app-x', template: '<p></p>' })\nclass A {}\n";
        assert!(locate_ts(source).unwrap().is_empty());
    }

    #[test]
    fn test_other_decorators_are_ignored() {
        let source = "@Injectable({ styles: '.a {}' })\nclass A {}\n";
        assert!(locate_ts(source).unwrap().is_empty());
    }

    #[test]
    fn test_member_decorator_and_string_key() {
        let source = "@ng.Component({ 'styles': ['.a {}'] })\nclass A {}\n";
        let spans = locate_ts(source).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw_text, ".a {}");
    }

    #[test]
    fn test_empty_literal() {
        let source = "@Component({ styles: [\"\"] })\nclass A {}\n";
        let spans = locate_ts(source).unwrap();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].is_empty());
        assert_eq!(spans[0].raw_text, "");
    }

    #[test]
    fn test_interpolated_template_is_fatal() {
        let source = "const c = 'red';\n@Component({ styles: ['.a {}', `.b { color: ${c}; }`] })\nclass A {}\n";
        let err = locate_ts(source).unwrap_err();
        match err {
            ExtractError::UnsupportedLiteralShape { line, kind, .. } => {
                assert_eq!(line, 2);
                assert_eq!(kind, "template literal with substitutions");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_identifier_value_is_fatal() {
        let source = "@Component({ styles: sharedStyles })\nclass A {}\n";
        assert!(matches!(
            locate_ts(source),
            Err(ExtractError::UnsupportedLiteralShape { .. })
        ));
    }

    #[test]
    fn test_custom_property() {
        let config = ExtractConfig {
            decorators: vec!["Component".to_string()],
            property: "hostStyles".to_string(),
        };
        let source = "@Component({ styles: '.a {}', hostStyles: '.b {}' })\nclass A {}\n";
        let spans = locate(source, None, &config).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw_text, ".b {}");
    }

    #[test]
    fn test_host_parse_error() {
        let source = "@Component({ styles: ['.a {}' })\nclass A {";
        assert!(matches!(
            locate_ts(source),
            Err(ExtractError::Parse { .. })
        ));
    }

    #[test]
    fn test_decorator_before_export_in_javascript() {
        let source = "@Component({ styles: '.a {}' })\nexport class A {}\n";
        let spans = locate(
            source,
            Some(Path::new("a.component.mjs")),
            &ExtractConfig::default(),
        )
        .unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw_text, ".a {}");
    }

    #[test]
    fn test_unsupported_shape_column_counts_characters() {
        let source = "// größe\n@Component({ /* ü */ styles: size })\nclass A {}\n";
        match locate_ts(source).unwrap_err() {
            ExtractError::UnsupportedLiteralShape { line, column, .. } => {
                assert_eq!((line, column), (2, 30));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_end_pos_rejects_oversized_sources() {
        assert_eq!(end_pos(0), Some(BytePos(1)));
        assert_eq!(end_pos(10), Some(BytePos(11)));
        assert_eq!(end_pos(u32::MAX as usize), None);
        assert_eq!(end_pos(usize::MAX), None);
    }
}
