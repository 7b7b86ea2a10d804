//! Source and destination root resolution shared by `watch` and `compress`

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

/// Canonical source root and an absolute, existing destination root.
///
/// The destination is created if missing. A destination inside the source
/// tree is rejected before anything is created: its outputs would be picked
/// up as new inputs.
pub fn resolve_roots(source: &Path, dest: &Path) -> MirrorResult<(PathBuf, PathBuf)> {
    if !source.is_dir() {
        return Err(MirrorError::DirectoryNotFound {
            path: source.to_path_buf(),
        });
    }
    let source = source.canonicalize()?;

    let target = resolve_target(dest)?;
    if target.starts_with(&source) {
        return Err(MirrorError::DestinationInsideSource {
            dest: target,
            source_root: source,
        });
    }

    fs::create_dir_all(&target)?;
    let dest = target.canonicalize()?;
    Ok((source, dest))
}

/// Where `path` will live once created: its deepest existing ancestor,
/// canonicalized, joined with the missing components.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    let path = std::path::absolute(path)?;
    let existing = path
        .ancestors()
        .find(|ancestor| ancestor.exists())
        .unwrap_or_else(|| Path::new("/"));

    let mut target = existing.canonicalize()?;
    let missing = path.strip_prefix(existing).unwrap_or(Path::new(""));
    for component in missing.components() {
        match component {
            Component::ParentDir => {
                target.pop();
            }
            Component::Normal(part) => target.push(part),
            _ => {}
        }
    }
    Ok(target)
}
