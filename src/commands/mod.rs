//! Command handlers
//!
//! Each handler loads configuration, picks an event sink for the output
//! mode, wires infrastructure into a use case and runs it.

pub mod compress;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use treemirror::config::Config;
use treemirror::domain::ports::{EventSink, MirrorEvent};
use treemirror::infrastructure::JsonEventSink;

use crate::cli::{Cli, ColorWhen};
use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;

/// Flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            color: cli.color,
            config: cli.config.clone(),
        }
    }

    /// Resolve config and output for one command run.
    ///
    /// `exec`, when non-empty, replaces the configured transform command.
    /// Config warnings are reported through the returned sink.
    pub(crate) fn session(&self, command: &str, exec: Vec<String>) -> Result<Session> {
        let (mut config, warnings) = Config::load_or_default(self.config.as_deref())?;
        if !exec.is_empty() {
            config.transform.command = exec;
        }

        let ui = UiContext::new(self.json, self.verbose, self.color, &config);
        let sink: Arc<dyn EventSink> = if ui.json {
            Arc::new(JsonEventSink::stdout(command).with_debug(ui.verbose > 0))
        } else {
            Arc::new(ConsoleEventSink::new(&ui))
        };

        for warning in warnings {
            sink.on_event(MirrorEvent::ConfigWarning {
                key: warning.key,
                file: warning.file.display().to_string(),
                suggestion: warning.suggestion,
            });
        }

        Ok(Session { config, ui, sink })
    }
}

pub(crate) struct Session {
    pub config: Config,
    pub ui: UiContext,
    pub sink: Arc<dyn EventSink>,
}
