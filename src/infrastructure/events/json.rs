//! JSON Event Sink
//!
//! Outputs mirror events as NDJSON for scripting and CI consumption.

use crate::domain::ports::{EventSink, MirrorEvent};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs one JSON object per line
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    command: String,
    debug: bool,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: impl Into<String>) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(command: impl Into<String>, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            command: command.into(),
            debug: false,
        }
    }

    /// Also emit per-path debug events.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl EventSink for JsonEventSink {
    fn on_event(&self, event: MirrorEvent) {
        if event.is_debug() && !self.debug {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event.to_json(&self.command));
            let _ = writer.flush();
        }
    }

    fn wants_debug_events(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SkipReason;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_writes_one_object_per_line() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("watch", writer);

        sink.on_event(MirrorEvent::Skipped {
            path: "/a/x.png".to_string(),
            reason: SkipReason::UpToDate,
        });
        sink.on_event(MirrorEvent::Shutdown);

        let out = lines(&buffer);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["event"], "skipped");
        assert_eq!(out[0]["reason"], "up_to_date");
        assert_eq!(out[0]["command"], "watch");
        assert_eq!(out[1]["event"], "shutdown");
    }

    #[test]
    fn json_sink_drops_debug_events_by_default() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("watch", writer);

        sink.on_event(MirrorEvent::DirectoryArmed {
            dir: "/a".to_string(),
        });

        assert!(!sink.wants_debug_events());
        assert!(lines(&buffer).is_empty());
    }

    #[test]
    fn json_sink_keeps_debug_events_when_asked() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("watch", writer).with_debug(true);

        sink.on_event(MirrorEvent::DirectoryHit {
            dir: "/a".to_string(),
            hit_count: 3,
        });

        let out = lines(&buffer);
        assert_eq!(out[0]["event"], "directory_hit");
        assert_eq!(out[0]["hit_count"], 3);
    }
}
