use window_counter_core::{Counter, Dumper, Int, Loader, SlidingWindowCounter, WindowSnapshot};

fn snapshot(start: i64, end: i64, step: i64, deltas: Vec<i64>) -> WindowSnapshot {
    WindowSnapshot { start, end, step, deltas }
}

#[test]
fn dump_of_fresh_counter_has_one_empty_slot() {
    let counter = SlidingWindowCounter::new(100, 40, 4);
    assert_eq!(counter.dump(), snapshot(100, 100, 10, vec![0]));
}

#[test]
fn dump_after_rotation_starts_at_oldest_ring_slot() {
    let counter = SlidingWindowCounter::new(0, 40, 4);
    for (i, tick) in [5, 15, 25, 35, 45].into_iter().enumerate() {
        counter.advance(tick, i as i64 + 1);
    }

    // tick 52: slot 0 (1) left the ring, slot 1 (2) is decaying
    assert_eq!(counter.advance(52, 0), 14);

    let dumped = counter.dump();
    assert_eq!(dumped, snapshot(10, 52, 10, vec![2, 3, 4, 5, 0]));
    assert_eq!(dumped.total(), 14);
    assert_eq!(dumped.window(), 50);
}

#[test]
fn load_into_same_geometry_round_trips() {
    let original = SlidingWindowCounter::new(0, 40, 4);
    for (i, tick) in [5, 15, 25, 35, 45].into_iter().enumerate() {
        original.advance(tick, i as i64 + 1);
    }
    original.advance(52, 0);
    let dumped = original.dump();

    // the target's own anchor is replaced by the snapshot's
    let restored = SlidingWindowCounter::new(999, 40, 4);
    restored.load(&dumped);

    assert_eq!(restored.start(), 10);
    assert_eq!(restored.now(), 52);
    assert_eq!(restored.dump(), dumped);
    assert_eq!(restored.advance(52, 0), original.advance(52, 0));
    assert_eq!(restored.advance(57, 0), original.advance(57, 0));
}

#[test]
fn load_splits_coarse_slots_with_remainder_last() {
    // one 30-tick slot of 10 into 10-tick slots: 3 + 3 + 4
    let counter = SlidingWindowCounter::new(0, 90, 9);
    counter.load(&snapshot(0, 29, 30, vec![10]));

    assert_eq!(counter.dump(), snapshot(0, 29, 10, vec![3, 3, 4]));
    assert_eq!(counter.advance(29, 0), 10);
}

#[test]
fn load_keeps_remainder_in_its_own_slot() {
    // the first 30-tick slot splits 3 + 3 + 4 inside [0, 30); none of it
    // may land in [30, 60), which only holds the second, empty slot
    let counter = SlidingWindowCounter::new(0, 90, 9);
    counter.load(&snapshot(0, 59, 30, vec![10, 0]));

    assert_eq!(counter.dump(), snapshot(0, 59, 10, vec![3, 3, 4, 0, 0, 0]));
    assert_eq!(counter.now(), 59);
    assert_eq!(counter.advance(59, 0), 10);
}

#[test]
fn load_clamps_replay_to_snapshot_end() {
    // the third sub-slot would start after `end`, so its share goes to `end`
    let counter = SlidingWindowCounter::new(0, 90, 9);
    counter.load(&snapshot(0, 15, 30, vec![9]));

    assert_eq!(counter.dump(), snapshot(0, 15, 10, vec![3, 6]));
    assert_eq!(counter.now(), 15);
}

#[test]
fn load_merges_fine_slots_into_coarse_ones() {
    let counter = SlidingWindowCounter::new(0, 80, 4);
    counter.load(&snapshot(0, 35, 10, vec![1, 2, 3, 4]));

    assert_eq!(counter.dump(), snapshot(0, 35, 20, vec![3, 7]));
    assert_eq!(counter.advance(35, 0), 10);
}

#[test]
fn load_discards_previous_state() {
    let counter = SlidingWindowCounter::new_no_lock(0, 40, 4);
    counter.advance(5, 50);
    counter.advance(15, 50);

    counter.load(&snapshot(500, 500, 10, Vec::new()));
    assert_eq!(counter.start(), 500);
    assert_eq!(counter.now(), 500);
    assert_eq!(counter.advance(500, 0), 0);
    assert_eq!(counter.duration(), 0);
}

#[test]
fn load_saturates_slot_times_instead_of_overflowing() {
    // slot 1 would start at 1 + Int::MAX
    let counter = SlidingWindowCounter::new(0, 40, 4);
    counter.load(&snapshot(1, 1, Int::MAX, vec![5, 7]));

    assert_eq!(counter.dump(), snapshot(1, 1, 10, vec![12]));
    assert_eq!(counter.advance(1, 0), 12);
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_serializes_to_json() {
    let counter = SlidingWindowCounter::new(0, 40, 4);
    counter.advance(5, 1);
    counter.advance(15, 2);

    let json = serde_json::to_string(&counter.dump()).unwrap();
    assert_eq!(json, r#"{"start":0,"end":15,"step":10,"deltas":[1,2]}"#);

    let parsed: WindowSnapshot = serde_json::from_str(&json).unwrap();
    let restored = SlidingWindowCounter::new(0, 40, 4);
    restored.load(&parsed);
    assert_eq!(restored.advance(15, 0), 3);
}
