//! File event kinds and the debounced pending event

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// What a change notification asks the mirror to do with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileEventKind {
    /// The source was created or modified; (re)process it.
    Update,
    /// The source is gone; delete its destination counterpart.
    Remove,
}

impl FileEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileEventKind::Update => "update",
            FileEventKind::Remove => "remove",
        }
    }
}

impl fmt::Display for FileEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path whose quiet period has elapsed, handed out by the debounce buffer.
///
/// Only the last recorded kind survives: a file that was updated and then
/// removed inside one window yields a single `Remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFileEvent {
    pub path: PathBuf,
    pub kind: FileEventKind,
    pub expires_at: Instant,
}
