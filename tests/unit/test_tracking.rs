//! Unit tests for the tracking ring buffer
//!
//! Tests cover:
//! - FIFO behaviour below capacity
//! - Eviction on the first and later laps
//! - Reader catch-up clearing the lap flag
//! - Empty reads

use overrun::ring::{Cursor, RingBuffer, TrackingRingBuffer};
use overrun::RingError;

fn buffer(capacity: usize) -> TrackingRingBuffer<i32> {
    TrackingRingBuffer::new(capacity).expect("capacity is positive")
}

// ============================================================================
// Construction
// ============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            TrackingRingBuffer::<i32>::new(0).unwrap_err(),
            RingError::InvalidCapacity { capacity: 0 }
        );
    }

    #[test]
    fn test_large_capacity() {
        let b = buffer(4096);
        assert_eq!(b.capacity(), 4096);
        assert_eq!(b.slots().len(), 4096);
        assert!(b.is_empty());
    }
}

// ============================================================================
// FIFO without overflow
// ============================================================================

mod fifo_tests {
    use super::*;

    #[test]
    fn test_values_come_back_in_write_order() {
        for capacity in 1..=6 {
            for count in 0..=capacity {
                let mut b = buffer(capacity);
                let values: Vec<i32> = (0..count as i32).map(|v| v * 10).collect();
                for &v in &values {
                    b.put(v);
                }
                assert_eq!(b.drain(), values, "capacity {} count {}", capacity, count);
                assert_eq!(b.get(), None);
            }
        }
    }

    #[test]
    fn test_steady_state_put_get_round_trip() {
        let mut b = buffer(3);
        for v in 0..50 {
            b.put(v);
            assert_eq!(b.get(), Some(v));
            assert!(b.is_empty());
            assert_eq!(b.head(), Cursor::Unset);
            assert_eq!(b.tail(), Cursor::Unset);
        }
    }

    #[test]
    fn test_reader_one_behind_crosses_the_wrap() {
        let mut b = buffer(3);
        b.put(0);
        for v in 1..20 {
            b.put(v);
            assert_eq!(b.get(), Some(v - 1));
        }
        assert_eq!(b.get(), Some(19));
        assert!(b.is_empty());
    }
}

// ============================================================================
// Overflow
// ============================================================================

mod overflow_tests {
    use super::*;

    #[test]
    fn test_capacity_three_put_four() {
        let mut b = buffer(3);
        for v in 1..=4 {
            b.put(v);
        }
        assert_eq!(b.get(), Some(2));
        assert_eq!(b.get(), Some(3));
        assert_eq!(b.get(), Some(4));
        assert_eq!(b.get(), None);
    }

    #[test]
    fn test_newest_capacity_values_survive_any_burst() {
        for capacity in 1..=5 {
            for count in 1..=20 {
                let mut b = buffer(capacity);
                for v in 1..=count {
                    b.put(v);
                }
                let keep = count.min(capacity as i32);
                let expected: Vec<i32> = (count - keep + 1..=count).collect();
                assert_eq!(b.drain(), expected, "capacity {} count {}", capacity, count);
            }
        }
    }

    #[test]
    fn test_partial_read_then_overflow() {
        // capacity 4: read two, then write six more
        let mut b = buffer(4);
        for v in 1..=4 {
            b.put(v);
        }
        assert_eq!(b.get(), Some(1));
        assert_eq!(b.get(), Some(2));
        for v in 5..=10 {
            b.put(v);
        }
        assert_eq!(b.drain(), vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_lap_flag_cleared_when_reader_wraps() {
        let mut b = buffer(3);
        for v in 1..=4 {
            b.put(v);
        }
        assert!(b.is_wrapped());
        assert_eq!(b.get(), Some(2));
        assert!(b.is_wrapped());
        assert_eq!(b.get(), Some(3));
        // head moved from slot 1 to slot 2; the next read wraps to slot 0
        assert!(b.is_wrapped());
        assert_eq!(b.get(), Some(4));
        assert!(!b.is_wrapped());
        assert!(b.is_empty());
    }
}

// ============================================================================
// Empty reads
// ============================================================================

mod empty_read_tests {
    use super::*;

    #[test]
    fn test_get_on_fresh_buffer_is_idempotent() {
        let mut b = buffer(3);
        for _ in 0..10 {
            assert_eq!(b.get(), None);
        }
        b.put(1);
        assert_eq!(b.get(), Some(1));
    }

    #[test]
    fn test_get_after_drain_does_not_move_cursors() {
        let mut b = buffer(2);
        for v in 1..=5 {
            b.put(v);
        }
        b.drain();
        let before = b.state();
        for _ in 0..3 {
            assert_eq!(b.get(), None);
        }
        assert_eq!(b.state(), before);
    }
}
