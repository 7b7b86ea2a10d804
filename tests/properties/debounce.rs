//! Property tests for last-write-wins coalescing in the debounce buffer.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use treemirror::domain::services::DebounceBuffer;
use treemirror::FileEventKind;

fn kind() -> impl Strategy<Value = FileEventKind> {
    prop_oneof![Just(FileEventKind::Update), Just(FileEventKind::Remove)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any burst on one path drains as a single event carrying the last kind.
    #[test]
    fn property_burst_yields_one_event_with_last_kind(
        burst in proptest::collection::vec((kind(), 0u64..4_000), 1..40)
    ) {
        let quiet = Duration::from_secs(5);
        let mut buf = DebounceBuffer::new(quiet, Duration::from_secs(1));
        let t0 = Instant::now();
        let path = PathBuf::from("/a/b.png");

        // Offsets are cumulative, each within the quiet period.
        let mut now = t0;
        for (kind, gap_ms) in &burst {
            now += Duration::from_millis(*gap_ms);
            buf.record(path.clone(), *kind, now);
        }

        prop_assert!(buf.drain_expired(now + quiet - Duration::from_millis(1)).is_empty());

        let drained = buf.drain_expired(now + quiet);
        prop_assert_eq!(drained.len(), 1);
        prop_assert_eq!(drained[0].kind, burst.last().unwrap().0);
        prop_assert_eq!(drained[0].expires_at, now + quiet);
        prop_assert!(buf.is_empty());
    }
}
