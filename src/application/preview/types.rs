use serde::Serialize;

/// A stylesheet included in a preview document. Order matters: later sheets
/// override earlier ones when the host renders the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    /// Logical asset name the stylesheet was resolved from.
    pub name: String,
    pub css: String,
}

/// A script included in a preview document. Order matters: the KaTeX library
/// must load before anything that calls into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Script {
    /// Bundled script asset.
    Bundled { name: String, js: String },
    /// Literal source injected into the page.
    Inline { source: String },
}

impl Script {
    pub fn source(&self) -> &str {
        match self {
            Script::Bundled { js, .. } => js,
            Script::Inline { source } => source,
        }
    }
}

/// Assembled preview: converter HTML plus ordered style and script sequences.
/// Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDocument {
    pub html: String,
    pub stylesheets: Vec<Stylesheet>,
    pub scripts: Vec<Script>,
}
