use ng_styles_extract::{locate_file, ExtractConfig, ExtractError, LiteralKind};
use std::fs;
use tempfile::TempDir;

const COMPONENT: &str = r#"import { Component } from "@angular/core";

@Component({
  selector: "app-example",
  styles: [".a { color: red; }", `
    .b {}
  `],
})
export class ExampleComponent {}
"#;

#[test]
fn test_locate_file_reads_typescript_from_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("example.component.ts");
    fs::write(&path, COMPONENT)?;

    let spans = locate_file(&path, &ExtractConfig::default())?;

    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].raw_text, ".a { color: red; }");
    assert_eq!(spans[0].kind, LiteralKind::StringLiteral);
    assert_eq!(spans[1].raw_text, "\n    .b {}\n  ");
    assert_eq!(spans[1].kind, LiteralKind::TemplateLiteral);

    for span in &spans {
        assert_eq!(&COMPONENT[span.start_offset..span.end_offset], span.raw_text);
    }
    Ok(())
}

#[test]
fn test_locate_file_reads_javascript_from_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("example.component.mjs");
    fs::write(
        &path,
        "@Component({ styles: 'p { margin: 0; }' })\nexport class A {}\n",
    )?;

    let spans = locate_file(&path, &ExtractConfig::default())?;
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].quote, '\'');
    Ok(())
}

#[test]
fn test_locate_file_rejects_unknown_extension() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("styles.css");
    fs::write(&path, "a {}")?;

    let err = locate_file(&path, &ExtractConfig::default()).unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFileType(p) if p == path));
    Ok(())
}

#[test]
fn test_locate_file_missing_file_is_io_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("missing.component.ts");

    let err = locate_file(&path, &ExtractConfig::default()).unwrap_err();
    assert!(matches!(err, ExtractError::Io(_)));
    Ok(())
}

#[test]
fn test_custom_decorator_and_property_from_config() -> anyhow::Result<()> {
    let config: ExtractConfig =
        serde_json::from_str(r#"{ "decorators": ["Widget"], "property": "css" }"#)?;

    let dir = TempDir::new()?;
    let path = dir.path().join("widget.ts");
    fs::write(
        &path,
        "@Component({ styles: 'a {}' })\nclass A {}\n@Widget({ css: 'b {}' })\nclass B {}\n",
    )?;

    let spans = locate_file(&path, &config)?;
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].raw_text, "b {}");
    Ok(())
}
