use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use treemirror::application::{WatchOptions, WatchUseCase};
use treemirror::infrastructure::transform;

use super::GlobalArgs;
use crate::ui::views::watch::render_watch_header;

pub fn cmd_watch(
    globals: &GlobalArgs,
    source: &Path,
    dest: &Path,
    no_initial_scan: bool,
    exec: Vec<String>,
) -> Result<()> {
    let session = globals.session("watch", exec)?;
    let config = &session.config;

    let options = WatchOptions::from_config(source, dest, config)
        .with_initial_scan(config.watch.initial_scan && !no_initial_scan);
    let transform = transform::from_config(&config.transform);
    let transform_name = transform.name().to_string();
    let use_case = WatchUseCase::new(options, transform)
        .with_filter(config.filter.ignore.clone(), config.filter.extensions.clone());

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    if !session.ui.json {
        print!(
            "{}",
            render_watch_header(
                &source.display().to_string(),
                &dest.display().to_string(),
                &transform_name,
                session.ui.color,
                session.ui.unicode,
            )
        );
    }

    use_case
        .start(running, session.sink)
        .with_context(|| format!("cannot watch {}", source.display()))
}
