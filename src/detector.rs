use std::path::{Path, PathBuf};

/// File names probed, in order, when the source argument is a directory.
pub const SOURCE_CANDIDATES: [&str; 4] = ["data.json", "awesome-sysadmin.md", "README.md", "readme.md"];

/// Auto-detect catalog documents in `dir` by scanning for known file names.
///
/// Returns existing candidates in probe order; the loader takes the first one
/// whose content is usable.
pub fn detect_sources(dir: &Path) -> Vec<PathBuf> {
    SOURCE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}
