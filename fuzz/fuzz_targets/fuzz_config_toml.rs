#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and validating arbitrary config text must never panic
        let path = Path::new("fuzz.toml");
        if let Ok((config, _warnings)) = treemirror::config::parse_with_warnings(content, path) {
            let _ = config.validate(path);
            let _ = config.watch.debounce();
            let _ = config.watch.reconcile_check();
        }
    }
});
