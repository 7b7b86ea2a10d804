//! Path filter value object
//!
//! Decides which paths under the source root take part in mirroring. Ignore
//! globs use gitignore semantics and are matched against the path and all of
//! its parents, so an ignored directory hides everything beneath it.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

/// Hidden entries and Synology `@eaDir`-style metadata.
pub const DEFAULT_IGNORE: &[&str] = &[".*", "@*"];

/// Extensions processed when no allow-list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Ignore globs plus an optional extension allow-list, rooted at the source root.
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
    /// Lower-cased, without the leading dot. Empty allows every extension.
    extensions: Vec<String>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(
        root: impl Into<PathBuf>,
        ignore: &[S],
        extensions: &[S],
    ) -> MirrorResult<Self> {
        let root = root.into();
        let mut builder = GitignoreBuilder::new(&root);
        let mut pattern_count = 0;

        for pattern in ignore {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, pattern)
                .map_err(|e| MirrorError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
            pattern_count += 1;
        }

        let matcher = builder.build().map_err(|e| MirrorError::InvalidPattern {
            pattern: ignore
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;

        let extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Ok(Self {
            root,
            matcher,
            pattern_count,
            extensions,
        })
    }

    /// The built-in defaults: hidden and Synology entries ignored, images only.
    pub fn with_defaults(root: impl Into<PathBuf>) -> MirrorResult<Self> {
        Self::new(root, DEFAULT_IGNORE, DEFAULT_EXTENSIONS)
    }

    /// A filter that ignores nothing and accepts every extension.
    pub fn allow_all(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let matcher = Gitignore::empty();
        Self {
            root,
            matcher,
            pattern_count: 0,
            extensions: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if a path should be ignored.
    ///
    /// Paths outside the root are always ignored; the root itself never is.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let rel = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            Err(_) if path.is_relative() => path,
            Err(_) => return true,
        };
        if rel.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel, is_dir)
            .is_ignore()
    }

    /// Check the extension allow-list. Comparison is case-insensitive.
    pub fn has_allowed_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == e)
            })
            .unwrap_or(false)
    }

    /// A regular file that should be transformed.
    pub fn accepts_file(&self, path: &Path) -> bool {
        !self.is_ignored(path, false) && self.has_allowed_extension(path)
    }
}
