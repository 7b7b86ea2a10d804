//! Human-readable event sink for terminal output

use std::io::Write;

use treemirror::domain::ports::{EventSink, MirrorEvent, SkipReason};

use crate::ui::context::UiContext;
use crate::ui::views::watch::render_mirror_event;

/// Prints one timestamped line per event; failures go to stderr.
///
/// Verbosity levels:
/// - `0`: lifecycle, processed, removed, failures
/// - `1`: also skips and the per-path debug trail
pub struct ConsoleEventSink {
    color: bool,
    unicode: bool,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn new(ui: &UiContext) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            verbose: ui.verbose,
        }
    }

    fn is_visible(&self, event: &MirrorEvent) -> bool {
        if self.verbose > 0 {
            return true;
        }
        match event {
            MirrorEvent::Skipped { reason, .. } => *reason == SkipReason::DestinationReadOnly,
            other => !other.is_debug(),
        }
    }
}

impl EventSink for ConsoleEventSink {
    fn on_event(&self, event: MirrorEvent) {
        if !self.is_visible(&event) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let line = render_mirror_event(&timestamp, &event, self.color, self.unicode);
        // A closed pipe must not take the watcher down.
        if event.is_error() {
            let _ = std::io::stderr().lock().write_all(line.as_bytes());
        } else {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(line.as_bytes());
            let _ = stdout.flush();
        }
    }

    fn wants_debug_events(&self) -> bool {
        self.verbose > 0
    }
}
