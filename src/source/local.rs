use std::path::Path;

use anyhow::{bail, Context, Result};

use super::{classify_text, LoadedDocument};
use crate::detector::{detect_sources, SOURCE_CANDIDATES};

/// Load a file, or the first usable candidate of a directory.
pub fn load_path(path: &Path) -> Result<LoadedDocument> {
    if path.is_dir() {
        return load_dir(path);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    match classify_text(&text) {
        Some(document) => Ok(LoadedDocument {
            document,
            origin: path.display().to_string(),
        }),
        None => bail!(
            "{} is neither a JSON catalog nor a Markdown list",
            path.display()
        ),
    }
}

fn load_dir(dir: &Path) -> Result<LoadedDocument> {
    for candidate in detect_sources(dir) {
        let text = match std::fs::read_to_string(&candidate) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(path = %candidate.display(), %err, "skipping unreadable candidate");
                continue;
            }
        };
        if let Some(document) = classify_text(&text) {
            return Ok(LoadedDocument {
                document,
                origin: candidate.display().to_string(),
            });
        }
        tracing::debug!(path = %candidate.display(), "skipping unusable candidate");
    }

    bail!(
        "no usable catalog in {} (looked for {})",
        dir.display(),
        SOURCE_CANDIDATES.join(", ")
    )
}
