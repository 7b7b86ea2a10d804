//! `notify` watcher adapter
//!
//! Registers a recursive watch and translates every notification into
//! zero or more `(kind, path)` pairs on a channel. The watcher callback runs
//! on `notify`'s own thread; the receiving end belongs to the control loop.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::value_objects::FileEventKind;
use crate::error::MirrorResult;

/// Message from the watcher thread to the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    Change { kind: FileEventKind, path: PathBuf },
    Error(String),
}

/// Keeps the watch registered for as long as it lives.
pub struct NotifyWatchAdapter {
    _watcher: RecommendedWatcher,
}

impl NotifyWatchAdapter {
    pub fn start(root: &Path, tx: Sender<WatchMessage>) -> MirrorResult<Self> {
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for (kind, path) in classify(&event, |p| p.exists()) {
                        let _ = tx.send(WatchMessage::Change { kind, path });
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchMessage::Error(e.to_string()));
                }
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(Self { _watcher: watcher })
    }
}

/// Map a notification onto update/remove pairs.
///
/// Renames become a removal of the old name plus an update of the new one.
/// When the backend cannot tell which side of a rename a path is on,
/// `exists` decides.
pub fn classify(event: &Event, exists: impl Fn(&Path) -> bool) -> Vec<(FileEventKind, PathBuf)> {
    let all = |kind: FileEventKind| -> Vec<(FileEventKind, PathBuf)> {
        event.paths.iter().map(|p| (kind, p.clone())).collect()
    };

    match &event.kind {
        EventKind::Access(_) => Vec::new(),
        EventKind::Remove(_) => all(FileEventKind::Remove),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => all(FileEventKind::Remove),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => all(FileEventKind::Update),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut out = Vec::with_capacity(event.paths.len());
            let mut paths = event.paths.iter();
            if let Some(from) = paths.next() {
                out.push((FileEventKind::Remove, from.clone()));
            }
            out.extend(paths.map(|p| (FileEventKind::Update, p.clone())));
            out
        }
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|p| {
                let kind = if exists(p) {
                    FileEventKind::Update
                } else {
                    FileEventKind::Remove
                };
                (kind, p.clone())
            })
            .collect(),
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any | EventKind::Other => {
            all(FileEventKind::Update)
        }
    }
}
