use std::path::Path;

/// Host languages that can carry component style literals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    /// TypeScript (.ts, .mts, .cts)
    #[default]
    TypeScript,
    /// JavaScript with decorators (.js, .mjs, .cjs)
    JavaScript,
}

impl Language {
    /// Detect language from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        match extension {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// Language for an optional path, falling back to TypeScript when the
    /// path is missing or has an unknown extension.
    pub fn detect(path: Option<&Path>) -> Self {
        path.and_then(Self::from_path).unwrap_or_default()
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Language::TypeScript)
    }
}
