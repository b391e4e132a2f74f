//! Notebook preview assembly.
//!
//! One synchronous call chain per request: convert the notebook via the
//! external executable, then attach the bundled styles and scripts in their
//! fixed priority order. A failed conversion aborts the request; a missing
//! asset only degrades the result.

mod convert;
mod types;

pub use convert::{ConvertError, NotebookConverter};
pub use types::{PreviewDocument, Script, Stylesheet};

use std::{path::Path, sync::Arc};

use tracing::warn;

use crate::config::Settings;
use crate::infra::assets::{self, AssetCatalog, AssetFile};

/// Main notebook stylesheet (overrides and additions for the converter's markup).
pub const MAIN_STYLESHEET: &str = "jupyter-main.css";
/// Chroma stylesheet (code syntax highlighting).
pub const CHROMA_STYLESHEET: &str = "shared-chroma.css";
/// KaTeX stylesheet (LaTeX math).
pub const KATEX_STYLESHEET: &str = "jupyter-katex.min.css";
/// KaTeX library.
pub const KATEX_SCRIPT: &str = "jupyter-katex.min.js";
/// KaTeX auto-renderer (finds LaTeX math on the page and calls KaTeX on it).
pub const KATEX_AUTO_RENDER_SCRIPT: &str = "jupyter-katex-auto-render.min.js";

/// Kicks the KaTeX auto-renderer once the library scripts are in place.
const MATH_BOOTSTRAP: &str = "renderMathInElement(document.body);";

/// Assembles preview documents for notebook files.
pub struct NotebookPreviewer {
    converter: NotebookConverter,
    catalog: Arc<dyn AssetCatalog>,
}

impl NotebookPreviewer {
    pub fn new(converter: NotebookConverter, catalog: Arc<dyn AssetCatalog>) -> Self {
        Self { converter, catalog }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            NotebookConverter::new(settings.converter.executable.clone()),
            assets::catalog(&settings.assets),
        )
    }

    /// Assemble a preview document for the notebook at `notebook`.
    pub fn preview(&self, notebook: &Path) -> Result<PreviewDocument, ConvertError> {
        let html = self.converter.convert(notebook)?;
        Ok(PreviewDocument {
            html,
            stylesheets: self.stylesheets(),
            scripts: self.scripts(),
        })
    }

    fn stylesheets(&self) -> Vec<Stylesheet> {
        // Main overrides first, then syntax highlighting, then math.
        [MAIN_STYLESHEET, CHROMA_STYLESHEET, KATEX_STYLESHEET]
            .into_iter()
            .filter_map(|name| self.lookup(name))
            .map(|asset| {
                let css = asset.text();
                Stylesheet {
                    name: asset.name,
                    css,
                }
            })
            .collect()
    }

    fn scripts(&self) -> Vec<Script> {
        let mut scripts: Vec<Script> = [KATEX_SCRIPT, KATEX_AUTO_RENDER_SCRIPT]
            .into_iter()
            .filter_map(|name| self.lookup(name))
            .map(|asset| {
                let js = asset.text();
                Script::Bundled {
                    name: asset.name,
                    js,
                }
            })
            .collect();

        scripts.push(Script::Inline {
            source: MATH_BOOTSTRAP.to_owned(),
        });
        scripts
    }

    fn lookup(&self, name: &'static str) -> Option<AssetFile> {
        let asset = self.catalog.get(name);
        if asset.is_none() {
            warn!(
                target = "application::preview",
                op = "preview::lookup_asset",
                result = "missing",
                asset = name,
                "Preview asset not found; rendering without it"
            );
        }
        asset
    }
}
