use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Project-local file access used by runtime plugins.
///
/// Paths are relative to the project root and use `/` separators.
/// Production code uses [`ProjectDir`]; tests use mockall-generated mocks.
pub trait ProjectFs {
    fn exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> crate::Result<String>;

    fn write(&self, path: &str, content: &str) -> crate::Result<()>;

    /// Files matching `pattern`, in lexicographic order.
    fn glob(&self, pattern: &str) -> crate::Result<Vec<String>>;
}

/// A project directory on disk.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectFs for ProjectDir {
    fn exists(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }

    fn read(&self, path: &str) -> crate::Result<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| crate::Error::FileRead {
            path: full,
            source: e,
        })
    }

    fn write(&self, path: &str, content: &str) -> crate::Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| crate::Error::FileWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        tracing::debug!(path = %full.display(), "writing project file");
        std::fs::write(&full, content).map_err(|e| crate::Error::FileWrite {
            path: full,
            source: e,
        })
    }

    fn glob(&self, pattern: &str) -> crate::Result<Vec<String>> {
        let full_pattern = format!(
            "{}/{}",
            Pattern::escape(&self.root.to_string_lossy()),
            pattern
        );
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let entries =
            glob::glob_with(&full_pattern, options).map_err(|e| crate::Error::GlobPattern {
                pattern: pattern.to_owned(),
                source: e,
            })?;

        let mut matches = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| crate::Error::GlobScan {
                pattern: pattern.to_owned(),
                source: e,
            })?;
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                tracing::warn!(path = %path.display(), "glob match outside project root; skipping");
                continue;
            };
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            matches.push(parts.join("/"));
        }

        matches.sort();
        tracing::debug!(pattern, count = matches.len(), "globbed project files");
        Ok(matches)
    }
}
