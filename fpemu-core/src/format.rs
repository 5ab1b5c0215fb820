//! Binary interchange format descriptors.
//!
//! A format is a zero-sized tag carrying the constants of one IEEE-754
//! binary width: the storage word, the exponent field width, and the
//! bias. Everything else (significand width, emin/emax, the field masks)
//! derives from those three, so bit-field extraction compiles down to
//! shifts and masks on the storage word.

use fpemu_wideint::{Word, U128};
use num_traits::One;
use num_traits::ops::wrapping::WrappingSub;

/// Compile-time description of one binary floating-point format.
///
/// The packed storage type is [`Format::Bits`]; for the formats the host
/// can hold natively that is a host integer, and past the host widths it
/// is a software wide integer providing the same primitives.
pub trait Format: Copy + Clone + core::fmt::Debug + PartialEq + Eq + 'static {
    /// Packed storage word; its width is the format's total width.
    type Bits: Word;

    /// Short lowercase name, e.g. `"binary32"`.
    const NAME: &'static str;

    /// Width of the biased exponent field in bits.
    const EXPONENT_BITS: u32;

    /// Exponent bias.
    const BIAS: i32;

    /// Total width of the packed value; always the width of
    /// [`Format::Bits`].
    const TOTAL_BITS: u32;

    /// Width of the trailing significand field in bits.
    const SIGNIFICAND_BITS: u32 = Self::TOTAL_BITS - Self::EXPONENT_BITS - 1;

    /// Largest unbiased exponent of a normal value.
    const EMAX: i32 = Self::BIAS;

    /// Smallest unbiased exponent of a normal value.
    const EMIN: i32 = 1 - Self::EMAX;

    /// Mask selecting the sign bit.
    #[inline]
    #[must_use]
    fn sign_mask() -> Self::Bits {
        Self::Bits::one() << (Self::TOTAL_BITS - 1)
    }

    /// Mask selecting the trailing significand field.
    #[inline]
    #[must_use]
    fn significand_mask() -> Self::Bits {
        (Self::Bits::one() << Self::SIGNIFICAND_BITS).wrapping_sub(&Self::Bits::one())
    }

    /// Mask for the exponent field value, before shifting into place.
    #[inline]
    #[must_use]
    fn exponent_field_mask() -> Self::Bits {
        (Self::Bits::one() << Self::EXPONENT_BITS).wrapping_sub(&Self::Bits::one())
    }

    /// The implicit leading-one bit of a normal significand.
    #[inline]
    #[must_use]
    fn implicit_bit() -> Self::Bits {
        Self::Bits::one() << Self::SIGNIFICAND_BITS
    }

    /// The all-ones exponent field value marking infinities and NaNs.
    #[inline]
    #[must_use]
    fn exponent_max_field() -> i32 {
        (1i32 << Self::EXPONENT_BITS) - 1
    }
}

/// IEEE-754 binary16: 1 sign bit, 5 exponent bits, 10 significand bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary16;

impl Format for Binary16 {
    type Bits = u16;
    const NAME: &'static str = "binary16";
    const TOTAL_BITS: u32 = 16;
    const EXPONENT_BITS: u32 = 5;
    const BIAS: i32 = 15;
}

/// IEEE-754 binary32: 1 sign bit, 8 exponent bits, 23 significand bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary32;

impl Format for Binary32 {
    type Bits = u32;
    const NAME: &'static str = "binary32";
    const TOTAL_BITS: u32 = 32;
    const EXPONENT_BITS: u32 = 8;
    const BIAS: i32 = 127;
}

/// IEEE-754 binary64: 1 sign bit, 11 exponent bits, 52 significand bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary64;

impl Format for Binary64 {
    type Bits = u64;
    const NAME: &'static str = "binary64";
    const TOTAL_BITS: u32 = 64;
    const EXPONENT_BITS: u32 = 11;
    const BIAS: i32 = 1023;
}

/// IEEE-754 binary128: 1 sign bit, 15 exponent bits, 112 significand
/// bits.
///
/// The storage word is the software [`U128`], which supplies the same
/// extended primitives the narrower formats get from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary128;

impl Format for Binary128 {
    type Bits = U128;
    const NAME: &'static str = "binary128";
    const TOTAL_BITS: u32 = 128;
    const EXPONENT_BITS: u32 = 15;
    const BIAS: i32 = 16383;
}
