use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_compress_header(
    source: &str,
    dest: &str,
    window: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Compress, "treemirror compress");
    header.add("Source", source);
    header.add("Destination", dest);
    if let Some(window) = window {
        header.add("Window", window);
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_compress_summary(
    processed: usize,
    skipped: usize,
    failed: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if failed > 0 {
        format!(
            "{} Compress: {} processed, {} skipped, {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            processed,
            skipped,
            ColoredText::error(format!("{} failed", failed)).render(supports_color)
        )
    } else {
        format!(
            "{} Compress: {} processed, {} skipped\n",
            Icon::Success.colored(supports_color, supports_unicode),
            processed,
            skipped
        )
    }
}
