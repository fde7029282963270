#![no_main]

use libfuzzer_sys::fuzz_target;
use overrun::ring::{AnyRingBuffer, Policy, RingBuffer};
use overrun::trace::{parse_script, replay_with};

fuzz_target!(|data: &[u8]| {
    let Ok(script) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(ops) = parse_script(script) else {
        return;
    };
    for policy in [Policy::Tracking, Policy::Minimal] {
        let mut buffer = AnyRingBuffer::with_policy(policy, 4).unwrap();
        let result = replay_with(&mut buffer, &ops, |step| {
            assert!(step.state.slots.len() == 4);
            Ok::<(), ()>(())
        });
        assert!(result.is_ok());
        assert!(buffer.capacity() == 4);
    }
});
