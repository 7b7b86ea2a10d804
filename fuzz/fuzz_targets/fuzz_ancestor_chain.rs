#![no_main]

use std::path::Path;
use std::time::Instant;

use libfuzzer_sys::fuzz_target;
use treemirror::domain::services::{ancestor_chain, ReconcileBuffer};

fuzz_target!(|data: &[u8]| {
    if let Ok(dir) = std::str::from_utf8(data) {
        let root = Path::new("/w");
        if let Some(chain) = ancestor_chain(root, Path::new(dir)) {
            assert_eq!(chain.first().map(|p| p.as_path()), Some(root));
        }
        let mut buffer = ReconcileBuffer::with_defaults(root);
        let _ = buffer.observe(Path::new(dir), Instant::now());
    }
});
