//! Wrapping indices into the chip's ring memories
//!
//! The command ring and the display list RAM are addressed with offsets
//! that wrap at their size. [`RingIndex`] keeps an offset reduced at all
//! times, so arithmetic can never produce an out-of-range value, and the
//! two ring sizes are distinct types that cannot be mixed up.

/// Offset into a ring of `SIZE` bytes, always reduced modulo `SIZE`
///
/// `SIZE` must be a nonzero power of two; this is checked at compile
/// time. All arithmetic wraps, and only the reduced value is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingIndex<const SIZE: u16> {
    value: u16,
}

/// Index into the coprocessor command ring
pub type CmdIndex = RingIndex<4096>;

/// Index into the display list RAM
pub type DlIndex = RingIndex<8192>;

impl<const SIZE: u16> RingIndex<SIZE> {
    const MASK: u16 = {
        assert!(SIZE != 0 && SIZE & (SIZE - 1) == 0);
        SIZE - 1
    };

    /// Create an index, reducing the raw value into range
    pub const fn new(value: u16) -> Self {
        Self {
            value: value & Self::MASK,
        }
    }

    /// The reduced offset, in `0..SIZE`
    pub const fn value(self) -> u16 {
        self.value
    }

    /// Index advanced by a signed delta
    pub const fn add(self, delta: i16) -> Self {
        Self::new(self.value.wrapping_add(delta as u16))
    }

    /// Index moved back by a signed delta
    pub const fn sub(self, delta: i16) -> Self {
        Self::new(self.value.wrapping_sub(delta as u16))
    }

    /// Advance in place
    pub fn advance(&mut self, delta: i16) {
        *self = self.add(delta);
    }

    /// Ring distance from `other` up to `self`
    ///
    /// This is `(self - other) mod SIZE`, the number of bytes written
    /// since `other` when `self` is a write cursor and `other` a read
    /// cursor.
    pub const fn distance_from(self, other: Self) -> u16 {
        self.value.wrapping_sub(other.value) & Self::MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_reduces_value() {
        assert_eq!(CmdIndex::new(4096).value(), 0);
        assert_eq!(CmdIndex::new(4100).value(), 4);
        assert_eq!(DlIndex::new(8191).value(), 8191);
    }

    #[test]
    fn add_wraps_at_size() {
        let index = CmdIndex::new(4094);
        assert_eq!(index.add(10).value(), 8);
    }

    #[test]
    fn sub_wraps_below_zero() {
        let index = CmdIndex::new(4);
        assert_eq!(index.sub(8).value(), 4092);
    }

    #[test]
    fn negative_delta_moves_backwards() {
        let index = CmdIndex::new(100);
        assert_eq!(index.add(-4).value(), 96);
    }

    #[test]
    fn distance_accounts_for_wrap() {
        let write = CmdIndex::new(10);
        let read = CmdIndex::new(4090);
        assert_eq!(write.distance_from(read), 16);
    }

    #[test]
    fn distance_zero_when_equal() {
        let index = CmdIndex::new(1234);
        assert_eq!(index.distance_from(index), 0);
    }

    proptest! {
        #[test]
        fn value_stays_in_range(start: u16, deltas in prop::collection::vec(any::<i16>(), 0..64)) {
            let mut index = CmdIndex::new(start);
            for delta in deltas {
                index.advance(delta);
                prop_assert!(index.value() < 4096);
            }
        }

        #[test]
        fn add_matches_modular_arithmetic(start: u16, delta: i16) {
            let index = CmdIndex::new(start);
            let expected = (start as i32 + delta as i32).rem_euclid(4096) as u16;
            prop_assert_eq!(index.add(delta).value(), expected);
        }

        #[test]
        fn add_then_sub_round_trips(start: u16, delta in -16384i16..16384) {
            let index = CmdIndex::new(start);
            prop_assert_eq!(index.add(delta).sub(delta), index);
        }
    }
}
