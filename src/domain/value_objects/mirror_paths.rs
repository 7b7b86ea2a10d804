//! Source/destination root pair and the path mapping between them

use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

/// The configured root pair. Every mirrored path is the source path
/// re-rooted under `dest_root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl MirrorPaths {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Path of `source` relative to the source root.
    pub fn relative<'a>(&self, source: &'a Path) -> MirrorResult<&'a Path> {
        source
            .strip_prefix(&self.source_root)
            .map_err(|_| MirrorError::PathEscape {
                path: source.to_path_buf(),
                root: self.source_root.clone(),
            })
    }

    /// `join(dest_root, relative(source_root, source))`. Pure, no I/O.
    pub fn dest_path_for(&self, source: &Path) -> MirrorResult<PathBuf> {
        let rel = self.relative(source)?;
        if rel.as_os_str().is_empty() {
            return Ok(self.dest_root.clone());
        }
        Ok(self.dest_root.join(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_nested_file() {
        let paths = MirrorPaths::new("/a", "/out");
        assert_eq!(
            paths.dest_path_for(Path::new("/a/trip/b.png")).unwrap(),
            PathBuf::from("/out/trip/b.png")
        );
    }

    #[test]
    fn maps_root_to_root() {
        let paths = MirrorPaths::new("/a", "/out");
        assert_eq!(
            paths.dest_path_for(Path::new("/a")).unwrap(),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn rejects_path_outside_source() {
        let paths = MirrorPaths::new("/a", "/out");
        let err = paths.dest_path_for(Path::new("/ab/c.png")).unwrap_err();
        assert!(matches!(err, MirrorError::PathEscape { .. }));
    }
}
