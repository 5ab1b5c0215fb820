//! The `Word` trait and its host-integer implementations.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use num_traits::ops::wrapping::{WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use num_traits::{Bounded, One, Zero};

/// A fixed-width unsigned machine word.
///
/// This is the narrow interface between the integer and floating-point
/// engines: everything the floating-point layer needs from its significand
/// carrier is expressed here, so a format can be backed by a host integer
/// or by a [`WideUint`](crate::WideUint) interchangeably.
///
/// Implementations exist for `u8` through `u128` (delegating to host
/// arithmetic) and for `WideUint<H>` for any `H: Word` (recursing into the
/// half-width limbs). Which one a given width resolves to is fixed at
/// compile time.
pub trait Word:
    Copy
    + Default
    + Eq
    + Ord
    + fmt::Debug
    + fmt::LowerHex
    + Zero
    + One
    + Bounded
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Width of the word in bits.
    const BITS: u32;

    /// Full-width sum with carry in and carry out.
    fn add_carry(self, rhs: Self, carry: bool) -> (Self, bool);

    /// Full-width difference with borrow in and borrow out.
    fn sub_borrow(self, rhs: Self, borrow: bool) -> (Self, bool);

    /// The `2W`-bit product as `(low, high)` words.
    fn multiply_extended(self, rhs: Self) -> (Self, Self);

    /// Quotient and remainder.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div_rem(self, rhs: Self) -> (Self, Self);

    /// Number of leading zero bits.
    fn leading_zeros(self) -> u32;

    /// Index of the highest set bit, or `None` for a zero word.
    #[inline]
    fn reverse_bit_scan(self) -> Option<u32> {
        if self.is_zero() {
            None
        } else {
            Some(Self::BITS - 1 - self.leading_zeros())
        }
    }

    /// Truncating conversion from a `u128` carrier.
    fn from_u128(value: u128) -> Self;

    /// Sign-extending, truncating conversion from an `i128` carrier.
    #[inline]
    fn from_i128(value: i128) -> Self {
        let low = Self::from_u128(value as u128);
        if value < 0 {
            // widths past the carrier fill the upper bits with the sign;
            // at or below it this mask is empty
            low | !Self::from_u128(u128::MAX)
        } else {
            low
        }
    }

    /// The low (up to) 128 bits of the word.
    fn as_u128(self) -> u128;

    /// Whether the lowest bit is set.
    #[inline]
    fn is_odd(self) -> bool {
        !(self & Self::one()).is_zero()
    }
}

macro_rules! impl_word_for_host {
    ($t:ty, $wide:ty) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn add_carry(self, rhs: Self, carry: bool) -> (Self, bool) {
                let (sum, c1) = self.overflowing_add(rhs);
                let (sum, c2) = sum.overflowing_add(carry as $t);
                (sum, c1 | c2)
            }

            #[inline]
            fn sub_borrow(self, rhs: Self, borrow: bool) -> (Self, bool) {
                let (diff, b1) = self.overflowing_sub(rhs);
                let (diff, b2) = diff.overflowing_sub(borrow as $t);
                (diff, b1 | b2)
            }

            #[inline]
            fn multiply_extended(self, rhs: Self) -> (Self, Self) {
                let wide = (self as $wide) * (rhs as $wide);
                (wide as $t, (wide >> <$t>::BITS) as $t)
            }

            #[inline]
            fn div_rem(self, rhs: Self) -> (Self, Self) {
                (self / rhs, self % rhs)
            }

            #[inline]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            #[inline]
            fn from_u128(value: u128) -> Self {
                value as $t
            }

            #[inline]
            fn as_u128(self) -> u128 {
                self as u128
            }
        }
    };
}

impl_word_for_host!(u8, u16);
impl_word_for_host!(u16, u32);
impl_word_for_host!(u32, u64);
impl_word_for_host!(u64, u128);

impl Word for u128 {
    const BITS: u32 = 128;

    #[inline]
    fn add_carry(self, rhs: Self, carry: bool) -> (Self, bool) {
        let (sum, c1) = self.overflowing_add(rhs);
        let (sum, c2) = sum.overflowing_add(carry as u128);
        (sum, c1 | c2)
    }

    #[inline]
    fn sub_borrow(self, rhs: Self, borrow: bool) -> (Self, bool) {
        let (diff, b1) = self.overflowing_sub(rhs);
        let (diff, b2) = diff.overflowing_sub(borrow as u128);
        (diff, b1 | b2)
    }

    fn multiply_extended(self, rhs: Self) -> (Self, Self) {
        // no wider host type, so FOIL over the u64 halves
        let (a_lo, a_hi) = (self as u64, (self >> 64) as u64);
        let (b_lo, b_hi) = (rhs as u64, (rhs >> 64) as u64);

        let ll = u128::from(a_lo) * u128::from(b_lo);
        let lh = u128::from(a_lo) * u128::from(b_hi);
        let hl = u128::from(a_hi) * u128::from(b_lo);
        let hh = u128::from(a_hi) * u128::from(b_hi);

        let (mid, mid_carry) = lh.overflowing_add(hl);
        let (low, low_carry) = ll.overflowing_add(mid << 64);
        let high = hh
            .wrapping_add(mid >> 64)
            .wrapping_add(u128::from(mid_carry) << 64)
            .wrapping_add(u128::from(low_carry));

        (low, high)
    }

    #[inline]
    fn div_rem(self, rhs: Self) -> (Self, Self) {
        (self / rhs, self % rhs)
    }

    #[inline]
    fn leading_zeros(self) -> u32 {
        u128::leading_zeros(self)
    }

    #[inline]
    fn from_u128(value: u128) -> Self {
        value
    }

    #[inline]
    fn as_u128(self) -> u128 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_add_carry_chains() {
        let (sum, carry) = Word::add_carry(0xFFu8, 0x01, false);
        assert_eq!((sum, carry), (0x00, true));

        let (sum, carry) = Word::add_carry(0xFEu8, 0x01, true);
        assert_eq!((sum, carry), (0x00, true));

        let (sum, carry) = Word::add_carry(0x10u8, 0x01, true);
        assert_eq!((sum, carry), (0x12, false));
    }

    #[test]
    fn host_sub_borrow_chains() {
        let (diff, borrow) = Word::sub_borrow(0x00u8, 0x01, false);
        assert_eq!((diff, borrow), (0xFF, true));

        let (diff, borrow) = Word::sub_borrow(0x01u8, 0x00, true);
        assert_eq!((diff, borrow), (0x00, false));
    }

    #[test]
    fn u128_extended_multiply_matches_school_arithmetic() {
        let (low, high) = Word::multiply_extended(u128::MAX, u128::MAX);
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(low, 1);
        assert_eq!(high, u128::MAX - 1);

        let (low, high) = Word::multiply_extended(1u128 << 127, 2u128);
        assert_eq!(low, 0);
        assert_eq!(high, 1);
    }

    #[test]
    fn reverse_bit_scan_finds_highest_bit() {
        assert_eq!(Word::reverse_bit_scan(0u32), None);
        assert_eq!(Word::reverse_bit_scan(1u32), Some(0));
        assert_eq!(Word::reverse_bit_scan(0x8000_0000u32), Some(31));
        assert_eq!(Word::reverse_bit_scan(0x0001_0002u32), Some(16));
    }
}
