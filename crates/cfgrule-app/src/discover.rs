//! Locate configuration item documents for the `check` use case.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Resolve `path` to the JSON documents to evaluate.
///
/// A file is returned as-is (whatever its extension). A directory is walked recursively for
/// `*.json` files, returned in sorted order so reports are stable across platforms.
pub fn discover_item_files(path: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("items path does not exist: {path}");
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.with_context(|| format!("walk {path}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("non-UTF-8 path: {}", p.display()))?;
        if file.extension() == Some("json") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}
