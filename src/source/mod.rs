//! Document loading: turn the `SOURCE` argument into a [`Document`].
//!
//! - [`local`]: a file, or a directory probed with [`crate::detector`].
//! - [`remote`]: an `http(s)://` URL fetched with `reqwest`.
//!
//! Whatever the origin, text goes through [`classify_text`]: a JSON object
//! is a structured catalog, anything else long enough is Markdown.

pub mod local;
pub mod remote;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::normalize::{Document, StructuredCatalog};

/// Markdown shorter than this (in characters) is not considered a list.
pub const MIN_MARKDOWN_CHARS: usize = 100;

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(String),
}

impl SourceLocation {
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Remote(arg.to_string())
        } else {
            SourceLocation::Local(PathBuf::from(arg))
        }
    }

    /// Directory searched for `.awesome-index/config.toml`.
    ///
    /// A directory source is its own base, a file source uses its parent, and
    /// a remote source falls back to the current directory.
    pub fn base_dir(&self) -> PathBuf {
        match self {
            SourceLocation::Local(path) if path.is_dir() => path.clone(),
            SourceLocation::Local(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            SourceLocation::Remote(_) => PathBuf::from("."),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// A document plus the file or URL it was read from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub origin: String,
}

/// Decide the shape of `text`.
///
/// JSON that is not an object is rejected outright rather than being read as
/// Markdown.
pub fn classify_text(text: &str) -> Option<Document> {
    if let Some(doc) = StructuredCatalog::from_json_str(text) {
        return Some(Document::Structured(doc));
    }
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return None;
    }
    if text.chars().count() > MIN_MARKDOWN_CHARS {
        return Some(Document::FreeForm(text.to_string()));
    }
    None
}

/// Load the document at `location`.
///
/// Fails when nothing usable can be read; the caller decides whether that is
/// fatal.
pub async fn load(location: &SourceLocation, show_progress: bool) -> Result<LoadedDocument> {
    let loaded = match location {
        SourceLocation::Local(path) => local::load_path(path)?,
        SourceLocation::Remote(url) => remote::load_url(url, show_progress).await?,
    };
    tracing::debug!(
        origin = %loaded.origin,
        kind = loaded.document.kind(),
        "loaded source document"
    );
    Ok(loaded)
}
