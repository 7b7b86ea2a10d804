use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::compress::render_compress_summary;
use treemirror::domain::ports::MirrorEvent;

pub fn render_watch_header(
    source: &str,
    dest: &str,
    transform: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "treemirror watch");
    header.add("Source", source);
    header.add("Destination", dest);
    header.add("Transform", transform);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// One console line for `event`, prefixed with `[timestamp]`.
pub fn render_mirror_event(
    timestamp: &str,
    event: &MirrorEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        MirrorEvent::WatchStarted { source, dest, .. } => format!(
            "{} {} Watching: {} -> {}\n",
            prefix,
            icon(Icon::Watch),
            source,
            dest
        ),
        MirrorEvent::Ready { initial_files, .. } => format!(
            "{} {} Ready ({} from initial scan)\n",
            prefix,
            icon(Icon::Success),
            plural(*initial_files, "file")
        ),
        MirrorEvent::RawEvent { kind, path } => {
            format!("{} {} {}: {}\n", prefix, icon(Icon::Arrow), kind, path)
        }
        MirrorEvent::Ignored { path } => {
            format!("{} {} Ignored: {}\n", prefix, icon(Icon::Pending), path)
        }
        MirrorEvent::DirectoryArmed { dir } => {
            format!("{} {} Armed: {}\n", prefix, icon(Icon::Arrow), dir)
        }
        MirrorEvent::DirectoryHit { dir, hit_count } => format!(
            "{} {} Hit: {} ({})\n",
            prefix,
            icon(Icon::Arrow),
            dir,
            hit_count
        ),
        MirrorEvent::Reconcile {
            dir,
            hit_count,
            files,
        } => format!(
            "{} {} Reconcile: {} ({}, {})\n",
            prefix,
            icon(Icon::Progress),
            dir,
            plural(*hit_count as usize, "event"),
            plural(*files, "file")
        ),
        MirrorEvent::TaskQueued { source, size, .. } => format!(
            "{} {} Queued: {} ({})\n",
            prefix,
            icon(Icon::Progress),
            source,
            format_bytes(*size)
        ),
        MirrorEvent::Skipped { path, reason } => format!(
            "{} {} Skipped: {} ({})\n",
            prefix,
            icon(Icon::Pending),
            path,
            reason.as_str()
        ),
        MirrorEvent::Processed {
            source,
            dest,
            source_bytes,
            output_bytes,
        } => {
            let sizes = match output_bytes {
                Some(out) => format!("{} -> {}", format_bytes(*source_bytes), format_bytes(*out)),
                None => format_bytes(*source_bytes),
            };
            format!(
                "{} {} {} -> {} ({})\n",
                prefix,
                icon(Icon::Success),
                source,
                dest,
                sizes
            )
        }
        MirrorEvent::Removed { path } => {
            format!("{} {} Removed: {}\n", prefix, icon(Icon::Trash), path)
        }
        MirrorEvent::TransformFailed {
            source,
            dest,
            size,
            message,
        } => format!(
            "{} {} Failed: {} -> {} ({}): {}\n",
            prefix,
            icon(Icon::Error),
            source,
            dest,
            format_bytes(*size),
            message
        ),
        MirrorEvent::HandlerPanicked { dropped, message } => format!(
            "{} {} Handler panicked, dropped {}: {}\n",
            prefix,
            icon(Icon::Error),
            plural(*dropped, "task"),
            message
        ),
        MirrorEvent::WatcherError { message } => format!(
            "{} {} Watcher error: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        MirrorEvent::ConfigWarning {
            key,
            file,
            suggestion,
        } => {
            let hint = suggestion
                .as_ref()
                .map(|s| format!(" (did you mean '{}'?)", s))
                .unwrap_or_default();
            format!(
                "{} {} Unknown config key '{}' in {}{}\n",
                prefix,
                icon(Icon::Warning),
                key,
                file,
                hint
            )
        }
        MirrorEvent::Error { message } => {
            format!("{} {} Error: {}\n", prefix, icon(Icon::Error), message)
        }
        MirrorEvent::CompressComplete {
            processed,
            skipped,
            failed,
        } => format!(
            "{} {}",
            prefix,
            render_compress_summary(
                *processed,
                *skipped,
                *failed,
                supports_color,
                supports_unicode
            )
        ),
        MirrorEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
