#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use treemirror::PathFilter;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line: ignore glob, second line: extension, rest: path to test.
    let mut lines = text.splitn(3, '\n');
    let pattern = lines.next().unwrap_or_default();
    let extension = lines.next().unwrap_or_default();
    let path = lines.next().unwrap_or_default();

    if let Ok(filter) = PathFilter::new("/root", &[pattern], &[extension]) {
        let candidate = Path::new("/root").join(path);
        let _ = filter.is_ignored(&candidate, false);
        let _ = filter.is_ignored(&candidate, true);
        let _ = filter.accepts_file(&candidate);
    }
});
