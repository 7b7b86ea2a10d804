//! Shared fakes for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::domain::ports::{
    DirectoryWalker, EventSink, FileSystem, FsError, FsResult, MirrorEvent, Transform,
    TransformError, TransformOutput,
};
use crate::domain::value_objects::{FileMetadata, PathFilter};

/// Event sink that records every event, debug ones included.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MirrorEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MirrorEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&self, event: MirrorEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn wants_debug_events(&self) -> bool {
        true
    }
}

/// Seconds after the epoch, for readable mtimes.
pub fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

/// In-memory metadata table standing in for the real file system.
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: Arc<Mutex<BTreeMap<PathBuf, FileMetadata>>>,
    read_only: Arc<Mutex<BTreeSet<PathBuf>>>,
    removed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, size: u64, modified_at: SystemTime) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), FileMetadata::file(size, modified_at));
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), FileMetadata::directory(at(0)));
    }

    pub fn set_read_only(&self, path: impl Into<PathBuf>) {
        self.read_only.lock().unwrap().insert(path.into());
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }

    /// Every file under `dir`, sorted.
    pub fn files_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, m)| !m.is_directory && p.starts_with(dir) && p.as_path() != dir)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> FsResult<FileMetadata> {
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn is_writable(&self, path: &Path) -> bool {
        !self.read_only.lock().unwrap().contains(path)
    }

    fn remove_all(&self, path: &Path) -> FsResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if !entries.contains_key(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        entries.retain(|p, _| !p.starts_with(path));
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

impl DirectoryWalker for MemoryFs {
    fn list(&self, dir: &Path, filter: &PathFilter) -> FsResult<Vec<PathBuf>> {
        if !self.exists(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(self
            .files_under(dir)
            .into_iter()
            .filter(|p| filter.accepts_file(p))
            .collect())
    }
}

/// Transform that records its calls and fails for chosen sources.
#[derive(Debug, Default)]
pub struct RecordingTransform {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    failing: Mutex<BTreeSet<PathBuf>>,
}

impl RecordingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, source: impl Into<PathBuf>) {
        self.failing.lock().unwrap().insert(source.into());
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transform for RecordingTransform {
    fn name(&self) -> &str {
        "recording"
    }

    fn transform(&self, source: &Path, dest_dir: &Path) -> Result<TransformOutput, TransformError> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_path_buf(), dest_dir.to_path_buf()));
        if self.failing.lock().unwrap().contains(source) {
            return Err(TransformError::CommandFailed {
                program: "recording".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "corrupt input".to_string(),
            });
        }
        let name = source
            .file_name()
            .ok_or_else(|| TransformError::NoFileName(source.to_path_buf()))?;
        Ok(TransformOutput {
            path: dest_dir.join(name),
            bytes: Some(1),
        })
    }
}
