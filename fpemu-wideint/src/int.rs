//! Signed wide integers: the two's-complement view of [`WideUint`].

use core::cmp::Ordering;
use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use num_traits::ops::wrapping::{WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use num_traits::{Bounded, One, Zero};

use crate::uint::WideUint;
use crate::word::Word;

/// A signed integer twice the width of its limb type `H`.
///
/// The bit pattern is shared with [`WideUint`]; only comparison, right
/// shift, division, and the extended multiply reinterpret it. Addition,
/// subtraction, and the modular product are sign-agnostic in two's
/// complement and delegate unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WideInt<H> {
    repr: WideUint<H>,
}

impl<H: Word> WideInt<H> {
    /// Width of the integer in bits.
    pub const BITS: u32 = H::BITS * 2;

    /// Reinterprets an unsigned value as signed.
    #[inline]
    #[must_use]
    pub fn from_bits(bits: WideUint<H>) -> Self {
        Self { repr: bits }
    }

    /// The underlying bit pattern.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> WideUint<H> {
        self.repr
    }

    /// Whether the sign bit is set.
    #[inline]
    #[must_use]
    pub fn is_negative(self) -> bool {
        (self.repr >> (Self::BITS - 1)).is_odd()
    }

    /// The magnitude as an unsigned value; the minimum value maps onto
    /// itself.
    #[inline]
    #[must_use]
    pub fn unsigned_abs(self) -> WideUint<H> {
        if self.is_negative() {
            self.repr.wrapping_neg()
        } else {
            self.repr
        }
    }

    /// Whether the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.repr.is_zero()
    }

    /// Signed quotient and remainder, truncating toward zero.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[must_use]
    pub fn div_rem(self, rhs: Self) -> (Self, Self) {
        let negate_quotient = self.is_negative() ^ rhs.is_negative();
        let (q, r) = self.unsigned_abs().div_rem(rhs.unsigned_abs());

        let quotient = if negate_quotient {
            Self::from_bits(q.wrapping_neg())
        } else {
            Self::from_bits(q)
        };
        // the remainder carries the dividend's sign
        let remainder = if self.is_negative() {
            Self::from_bits(r.wrapping_neg())
        } else {
            Self::from_bits(r)
        };
        (quotient, remainder)
    }

    /// The `2W`-bit signed product as `(low bits, signed high word)`.
    #[must_use]
    pub fn multiply_extended(self, rhs: Self) -> (WideUint<H>, Self) {
        let (low, high) = self.unsigned_abs().multiply_extended(rhs.unsigned_abs());
        if self.is_negative() ^ rhs.is_negative() {
            // negate the whole 2W-bit product
            let (low, borrow) = WideUint::zero().sub_borrow(low, false);
            let (high, _) = WideUint::zero().sub_borrow(high, borrow);
            (low, Self::from_bits(high))
        } else {
            (low, Self::from_bits(high))
        }
    }

    /// Index of the highest set bit of the raw pattern, or `None` for
    /// zero.
    #[inline]
    #[must_use]
    pub fn reverse_bit_scan(self) -> Option<u32> {
        self.repr.reverse_bit_scan()
    }
}

impl<H: Word> Zero for WideInt<H> {
    #[inline]
    fn zero() -> Self {
        Self::from_bits(WideUint::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.repr.is_zero()
    }
}

impl<H: Word> One for WideInt<H> {
    #[inline]
    fn one() -> Self {
        Self::from_bits(WideUint::one())
    }
}

impl<H: Word> Bounded for WideInt<H> {
    #[inline]
    fn min_value() -> Self {
        Self::from_bits(WideUint::one() << (Self::BITS - 1))
    }

    #[inline]
    fn max_value() -> Self {
        Self::from_bits(WideUint::max_value() >> 1)
    }
}

impl<H: Word> Ord for WideInt<H> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // same sign: two's complement orders like the raw bits
            _ => self.repr.cmp(&other.repr),
        }
    }
}

impl<H: Word> PartialOrd for WideInt<H> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H: Word> WrappingAdd for WideInt<H> {
    #[inline]
    fn wrapping_add(&self, v: &Self) -> Self {
        Self::from_bits(self.repr.wrapping_add(&v.repr))
    }
}

impl<H: Word> WrappingSub for WideInt<H> {
    #[inline]
    fn wrapping_sub(&self, v: &Self) -> Self {
        Self::from_bits(self.repr.wrapping_sub(&v.repr))
    }
}

impl<H: Word> WrappingMul for WideInt<H> {
    #[inline]
    fn wrapping_mul(&self, v: &Self) -> Self {
        Self::from_bits(self.repr.wrapping_mul(&v.repr))
    }
}

impl<H: Word> WrappingNeg for WideInt<H> {
    #[inline]
    fn wrapping_neg(&self) -> Self {
        Self::from_bits(self.repr.wrapping_neg())
    }
}

impl<H: Word> Add for WideInt<H> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(&rhs)
    }
}

impl<H: Word> Sub for WideInt<H> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(&rhs)
    }
}

impl<H: Word> Mul for WideInt<H> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(&rhs)
    }
}

impl<H: Word> Div for WideInt<H> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.div_rem(rhs).0
    }
}

impl<H: Word> Rem for WideInt<H> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self {
        self.div_rem(rhs).1
    }
}

impl<H: Word> Neg for WideInt<H> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl<H: Word> Not for WideInt<H> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_bits(!self.repr)
    }
}

impl<H: Word> BitAnd for WideInt<H> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_bits(self.repr & rhs.repr)
    }
}

impl<H: Word> BitOr for WideInt<H> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.repr | rhs.repr)
    }
}

impl<H: Word> BitXor for WideInt<H> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_bits(self.repr ^ rhs.repr)
    }
}

impl<H: Word> Shl<u32> for WideInt<H> {
    type Output = Self;

    #[inline]
    fn shl(self, amount: u32) -> Self {
        Self::from_bits(self.repr << amount)
    }
}

/// Arithmetic right shift: the vacated upper bits replicate the sign.
impl<H: Word> Shr<u32> for WideInt<H> {
    type Output = Self;

    #[inline]
    fn shr(self, amount: u32) -> Self {
        debug_assert!(amount < Self::BITS, "shift amount out of range");
        if amount == 0 {
            return self;
        }
        let logical = self.repr >> amount;
        if self.is_negative() {
            Self::from_bits(logical | (WideUint::max_value() << (Self::BITS - amount)))
        } else {
            Self::from_bits(logical)
        }
    }
}

macro_rules! impl_signed_assign_ops {
    ($($trait:ident, $method:ident, $op:tt);* $(;)?) => {
        $(
            impl<H: Word> $trait for WideInt<H> {
                #[inline]
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_signed_assign_ops!(
    AddAssign, add_assign, +;
    SubAssign, sub_assign, -;
    MulAssign, mul_assign, *;
    DivAssign, div_assign, /;
    RemAssign, rem_assign, %;
    BitAndAssign, bitand_assign, &;
    BitOrAssign, bitor_assign, |;
    BitXorAssign, bitxor_assign, ^;
);

impl<H: Word> ShlAssign<u32> for WideInt<H> {
    #[inline]
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl<H: Word> ShrAssign<u32> for WideInt<H> {
    #[inline]
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

impl<H: Word> fmt::LowerHex for WideInt<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.repr, f)
    }
}

impl<H: Word> fmt::Debug for WideInt<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.repr, f)
    }
}

// sign-extending construction

macro_rules! impl_from_small_signed {
    ($($t:ty),*) => {
        $(
            impl<H: Word> From<$t> for WideInt<H> {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_bits(WideUint::from_i128(value as i128))
                }
            }
        )*
    };
}

impl_from_small_signed!(i8, i16, u8, u16);

macro_rules! impl_from_for_signed_alias {
    ($alias:ty; $($t:ty),*) => {
        $(
            impl From<$t> for $alias {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_bits(Word::from_i128(value as i128))
                }
            }
        )*
    };
}

impl_from_for_signed_alias!(crate::I32; i32, u32);
impl_from_for_signed_alias!(crate::I64; i32, u32, i64, u64);
impl_from_for_signed_alias!(crate::I128; i32, u32, i64, u64, i128, u128);
impl_from_for_signed_alias!(crate::I256; i32, u32, i64, u64, i128, u128);

macro_rules! impl_signed_into_host {
    ($alias:ty => $t:ty) => {
        impl From<$alias> for $t {
            #[inline]
            fn from(value: $alias) -> Self {
                value.to_bits().as_u128() as $t
            }
        }
    };
}

impl_signed_into_host!(crate::I16 => i16);
impl_signed_into_host!(crate::I32 => i32);
impl_signed_into_host!(crate::I64 => i64);
impl_signed_into_host!(crate::I128 => i128);
