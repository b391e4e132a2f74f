//! Preview asset lookup: embedded bundle with an optional filesystem override.

use std::{borrow::Cow, fs, path::PathBuf, sync::Arc};

use include_dir::{Dir, include_dir};

use crate::config::AssetSettings;

static BUNDLED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// A resolved preview asset: logical name plus its contents.
#[derive(Debug, Clone)]
pub struct AssetFile {
    pub name: String,
    pub contents: Cow<'static, [u8]>,
}

impl AssetFile {
    /// Asset contents as text. The bundled assets are CSS and JavaScript, so
    /// lossy decoding only matters for corrupted override files.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }
}

/// Lookup interface for preview assets. Lookups never fail the request:
/// a missing asset is `None` and the caller decides how to degrade.
pub trait AssetCatalog: Send + Sync {
    fn get(&self, name: &str) -> Option<AssetFile>;
}

/// Catalog backed by the assets compiled into the binary.
#[derive(Debug, Default)]
pub struct BundledAssets;

impl AssetCatalog for BundledAssets {
    fn get(&self, name: &str) -> Option<AssetFile> {
        let candidate = sanitize(name)?;
        let file = BUNDLED_ASSETS.get_file(candidate)?;
        Some(AssetFile {
            name: candidate.to_owned(),
            contents: Cow::Borrowed(file.contents()),
        })
    }
}

/// Catalog backed by a directory on disk (development override).
#[derive(Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetCatalog for DirAssets {
    fn get(&self, name: &str) -> Option<AssetFile> {
        let candidate = sanitize(name)?;
        let contents = fs::read(self.root.join(candidate)).ok()?;
        Some(AssetFile {
            name: candidate.to_owned(),
            contents: Cow::Owned(contents),
        })
    }
}

/// Build the catalog selected by the asset settings.
pub fn catalog(settings: &AssetSettings) -> Arc<dyn AssetCatalog> {
    match settings.directory.as_ref() {
        Some(directory) => Arc::new(DirAssets::new(directory.clone())),
        None => Arc::new(BundledAssets),
    }
}

fn sanitize(name: &str) -> Option<&str> {
    let candidate = name.trim_start_matches('/');
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        // Avoid directory traversal and disallow directory listings.
        return None;
    }
    Some(candidate)
}
