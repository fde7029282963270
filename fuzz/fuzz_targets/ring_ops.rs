#![no_main]

use libfuzzer_sys::fuzz_target;
use overrun::ring::{MinimalRingBuffer, RingBuffer, TrackingRingBuffer};

// First byte picks the capacity, every following byte is one operation:
// odd bytes read, even bytes write an increasing sample.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;
    let mut tracking = TrackingRingBuffer::new(capacity).unwrap();
    let mut minimal = MinimalRingBuffer::new(capacity).unwrap();

    let mut next = 0i32;
    let mut last_read = None;
    for &byte in ops {
        if byte & 1 == 1 {
            if let Some(v) = tracking.get() {
                assert!(last_read.map_or(true, |prev| v > prev));
                last_read = Some(v);
            } else {
                assert!(tracking.is_empty());
            }
            minimal.get();
        } else {
            tracking.put(next);
            minimal.put(next);
            next += 1;
        }
        assert_eq!(
            tracking.is_empty(),
            tracking.slots().iter().all(Option::is_none)
        );
        assert!(minimal.head() <= minimal.tail() && minimal.tail() <= capacity);
        assert!(minimal.state().slots.len() == capacity);
    }
});
