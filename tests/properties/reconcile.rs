//! Property tests for upward coalescing in the reconciliation buffer.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use proptest::prelude::*;

use treemirror::domain::services::{ancestor_chain, Observation, ReconcileBuffer};

const ROOT: &str = "/w";

fn relative_dir() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[a-c]{1,2}").unwrap();
    proptest::collection::vec(segment, 0..=3)
}

fn dir_from(segments: &[String]) -> PathBuf {
    let mut dir = PathBuf::from(ROOT);
    for s in segments {
        dir.push(s);
    }
    dir
}

fn buffer() -> ReconcileBuffer {
    ReconcileBuffer::new(ROOT, Duration::from_secs(30), Duration::from_secs(5))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every in-root event is counted against exactly one check.
    #[test]
    fn property_hits_sum_to_event_count(
        dirs in proptest::collection::vec(relative_dir(), 1..64)
    ) {
        let mut buf = buffer();
        let t0 = Instant::now();
        let mut armed = Vec::new();

        for segments in &dirs {
            if let Observation::Armed { dir } = buf.observe(&dir_from(segments), t0) {
                armed.push(dir);
            }
        }

        prop_assert_eq!(armed.len(), buf.len());
        let total: u32 = armed
            .iter()
            .map(|d| buf.check(d).map(|c| c.hit_count).unwrap_or(0))
            .sum();
        prop_assert_eq!(total as usize, dirs.len());
    }

    /// PROPERTY: k events in one directory yield one check with hit_count k.
    #[test]
    fn property_single_directory_arms_once(
        segments in relative_dir(),
        k in 1usize..200
    ) {
        let mut buf = buffer();
        let t0 = Instant::now();
        let dir = dir_from(&segments);

        for i in 0..k {
            buf.observe(&dir, t0 + Duration::from_millis(i as u64 * 10));
        }

        prop_assert_eq!(buf.len(), 1);
        prop_assert_eq!(buf.check(&dir).unwrap().hit_count as usize, k);
    }

    /// PROPERTY: the deadline is fixed by the first hit; later hits never move it.
    #[test]
    fn property_deadline_is_first_hit(
        offsets in proptest::collection::vec(0u64..29_000, 1..50)
    ) {
        let mut buf = buffer();
        let t0 = Instant::now();
        let dir = Path::new("/w/trip");

        buf.observe(dir, t0);
        for ms in &offsets {
            buf.observe(dir, t0 + Duration::from_millis(*ms));
        }

        let check = buf.check(dir).unwrap();
        prop_assert_eq!(check.expires_at, t0 + Duration::from_secs(30));
        prop_assert_eq!(check.hit_count as usize, offsets.len() + 1);
    }

    /// PROPERTY: ancestor chains start at the root and end at the directory.
    #[test]
    fn property_ancestor_chain_bounds(segments in relative_dir()) {
        let dir = dir_from(&segments);
        let chain = ancestor_chain(Path::new(ROOT), &dir).unwrap();

        prop_assert_eq!(chain.first().map(PathBuf::as_path), Some(Path::new(ROOT)));
        prop_assert_eq!(chain.last(), Some(&dir));
        prop_assert_eq!(chain.len(), segments.len() + 1);
    }
}

#[test]
fn paths_outside_root_are_not_counted() {
    let mut buf = buffer();
    assert_eq!(
        buf.observe(Path::new("/elsewhere/x"), Instant::now()),
        Observation::OutsideRoot
    );
    assert!(buf.is_empty());
}
