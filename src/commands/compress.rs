use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use treemirror::application::{resolve_roots, CompressOptions, CompressUseCase};
use treemirror::domain::value_objects::{MirrorPaths, PathFilter};
use treemirror::infrastructure::{transform, IgnoreWalker, LocalFs};

use super::GlobalArgs;
use crate::ui::views::compress::render_compress_header;

/// Returns `Ok(false)` when at least one file failed to transform.
pub fn cmd_compress(
    globals: &GlobalArgs,
    source: &Path,
    dest: &Path,
    options: CompressOptions,
    exec: Vec<String>,
) -> Result<bool> {
    let session = globals.session("compress", exec)?;
    let config = &session.config;

    let (source, dest) = resolve_roots(source, dest)
        .with_context(|| format!("cannot compress {}", source.display()))?;

    if !session.ui.json {
        let window = describe_window(options.after, options.before);
        print!(
            "{}",
            render_compress_header(
                &source.display().to_string(),
                &dest.display().to_string(),
                window.as_deref(),
                session.ui.color,
                session.ui.unicode,
            )
        );
    }

    let filter = PathFilter::new(&source, &config.filter.ignore, &config.filter.extensions)?;
    let use_case = CompressUseCase::new(
        MirrorPaths::new(&source, &dest),
        LocalFs::new(),
        IgnoreWalker::new(),
        filter,
        transform::from_config(&config.transform),
        session.sink,
    )
    .with_options(options);

    let summary = use_case.run()?;
    Ok(summary.is_success())
}

fn describe_window(after: Option<DateTime<Utc>>, before: Option<DateTime<Utc>>) -> Option<String> {
    let fmt = |t: Option<DateTime<Utc>>| t.map(|t| t.to_rfc3339()).unwrap_or_default();
    if after.is_none() && before.is_none() {
        return None;
    }
    Some(format!("{} .. {}", fmt(after), fmt(before)).trim().to_string())
}
