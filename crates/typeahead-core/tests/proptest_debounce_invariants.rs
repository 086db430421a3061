//! Property-based invariant tests for the debouncer.
//!
//! 1. A pending deadline never exceeds the burst start plus `max_wait`.
//! 2. A trailing fire always yields the most recent pushed value.
//! 3. Nothing fires before the first push or after `cancel`.
//! 4. No panics for arbitrary push/poll interleavings.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use typeahead_core::debounce::{DebounceConfig, Debouncer};

#[derive(Debug, Clone)]
enum Op {
    Push(u64),
    Poll(u64),
    Cancel,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..200).prop_map(Op::Push),
        (0u64..200).prop_map(Op::Poll),
        Just(Op::Cancel),
    ]
}

proptest! {
    #[test]
    fn deadline_respects_max_wait(
        delay in 1u64..100,
        extra in 0u64..200,
        gaps in proptest::collection::vec(0u64..150, 1..40),
    ) {
        let max_wait = Duration::from_millis(delay + extra);
        let config = DebounceConfig::new(Duration::from_millis(delay)).with_max_wait(max_wait);
        let mut d = Debouncer::new(config).unwrap();
        let t0 = Instant::now();
        let mut now = t0;
        let mut burst_start: Option<Instant> = None;

        for (i, gap) in gaps.into_iter().enumerate() {
            now += Duration::from_millis(gap);
            if d.deadline().is_some_and(|deadline| now >= deadline) {
                burst_start = None;
            }
            d.push(i, now);
            let start = *burst_start.get_or_insert(now);
            let deadline = d.deadline().unwrap();
            prop_assert!(deadline >= now, "deadline in the past");
            prop_assert!(
                deadline <= start + max_wait,
                "deadline {:?} beyond burst budget",
                deadline.duration_since(t0)
            );
        }
    }

    #[test]
    fn trailing_fire_is_latest_value(
        gaps in proptest::collection::vec(0u64..40, 1..20),
    ) {
        let mut d = Debouncer::new(DebounceConfig::new(Duration::from_millis(50))).unwrap();
        let mut now = Instant::now();
        let mut last = 0;
        for (i, gap) in gaps.into_iter().enumerate() {
            now += Duration::from_millis(gap);
            d.push(i, now);
            last = i;
        }
        prop_assert_eq!(d.poll(now + Duration::from_millis(50)), Some(last));
        prop_assert!(!d.is_pending());
    }

    #[test]
    fn arbitrary_sequences_never_panic(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let config = DebounceConfig::new(Duration::from_millis(30)).with_leading(true);
        let mut d = Debouncer::new(config).unwrap();
        let mut now = Instant::now();
        let mut pushed_since_cancel = false;
        for op in ops {
            match op {
                Op::Push(gap) => {
                    now += Duration::from_millis(gap);
                    let _ = d.push(gap, now);
                    pushed_since_cancel = true;
                }
                Op::Poll(gap) => {
                    now += Duration::from_millis(gap);
                    let fired = d.poll(now);
                    if !pushed_since_cancel {
                        prop_assert!(fired.is_none(), "fired without a push");
                    }
                }
                Op::Cancel => {
                    d.cancel();
                    pushed_since_cancel = false;
                    prop_assert!(d.deadline().is_none());
                }
            }
        }
    }
}
