use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Forward-slash path of a configuration item document, relative to the scanned root.
///
/// Reports must not depend on the host OS or the absolute checkout location, so:
/// - backslashes become `/`
/// - leading `./` is dropped
/// - the empty path is spelled `.`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Path of `file` relative to `root`; falls back to `file` itself when it lies elsewhere.
    pub fn relative_to(file: &Utf8Path, root: &Utf8Path) -> Self {
        match file.strip_prefix(root) {
            Ok(rel) if !rel.as_str().is_empty() => RepoPath::new(rel.as_str()),
            Ok(_) => RepoPath::new(file.file_name().unwrap_or(file.as_str())),
            Err(_) => RepoPath::new(file.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}
