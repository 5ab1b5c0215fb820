//! The packed floating-point value and its decomposition machinery.
//!
//! A [`Float`] is a single packed word laid out MSB to LSB as
//! `[sign | biased exponent | trailing significand]`. Arithmetic never
//! works on the packed form directly: every operation decomposes its
//! operands into `(class, sign, exponent, significand)`, filters the
//! special classes, operates on the significands, and recomposes through
//! the shared rounding helpers.
//!
//! Rounding is round-to-nearest-ties-to-even throughout. Bits shifted
//! out of a significand are tracked in a round-off word as wide as the
//! format, aligned so its top bit is the highest discarded bit; the tie
//! threshold is therefore always `1 << (W - 1)` regardless of how many
//! bits were discarded.

use core::fmt;

use fpemu_wideint::Word;
use num_traits::One;
use num_traits::Zero;
use num_traits::ops::wrapping::{WrappingAdd, WrappingSub};

use crate::error::TripletError;
use crate::format::Format;

mod arith;
mod cmp;
mod convert;
mod display;

/// Classification of a packed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FpClass {
    /// Exponent field all ones, non-zero significand.
    Nan,
    /// Exponent field all ones, zero significand.
    Infinity,
    /// All fields zero apart from the sign.
    Zero,
    /// Finite value with an implicit leading one.
    Normal,
    /// Exponent field zero, non-zero significand; no implicit one.
    Subnormal,
}

/// A software-emulated IEEE-754 binary floating-point value.
///
/// `F` selects the interchange format and with it the packed storage
/// word. The emulation is bit-exact: for every representable input pair
/// the result is the bit pattern conforming hardware would produce,
/// including subnormals, signed zeros, infinities, NaN propagation, and
/// ties-to-even rounding.
///
/// Values are plain words; every operation returns a new value and no
/// operation allocates.
///
/// # Examples
///
/// ```
/// use fpemu_core::Float32;
///
/// let a = Float32::from_f32(0.1);
/// let b = Float32::from_f32(0.2);
/// assert_eq!((a + b).to_f32(), 0.1 + 0.2);
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "F::Bits: serde::Serialize",
        deserialize = "F::Bits: serde::Deserialize<'de>"
    ))
)]
pub struct Float<F: Format> {
    bits: F::Bits,
}

/// A decomposed value; transient, never stored.
///
/// For [`FpClass::Normal`] the significand includes the implicit leading
/// one in bit `S` and the exponent is unbiased. For
/// [`FpClass::Subnormal`] the significand is the raw trailing field and
/// the exponent is pinned to emin. For the remaining classes the
/// exponent keeps the raw field value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Components<F: Format> {
    pub(crate) class: FpClass,
    pub(crate) sign: bool,
    pub(crate) exponent: i32,
    pub(crate) significand: F::Bits,
}

impl<F: Format> Float<F> {
    //
    // construction
    //

    /// Reinterprets a raw bit pattern.
    #[inline]
    #[must_use]
    pub fn from_bits(bits: F::Bits) -> Self {
        Self { bits }
    }

    /// The raw bit pattern.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> F::Bits {
        self.bits
    }

    /// Zero of the given sign.
    #[must_use]
    pub fn zero(negative: bool) -> Self {
        Self::from_fields(negative, 0, F::Bits::zero())
    }

    /// Infinity of the given sign.
    #[must_use]
    pub fn infinity(negative: bool) -> Self {
        Self::from_fields(negative, F::exponent_max_field(), F::Bits::zero())
    }

    /// The canonical NaN produced by invalid operations: sign set,
    /// exponent all ones, only the quiet bit of the significand set.
    #[must_use]
    pub fn indeterminate_nan() -> Self {
        Self::from_fields(
            true,
            F::exponent_max_field(),
            F::Bits::one() << (F::SIGNIFICAND_BITS - 1),
        )
    }

    /// A subnormal from its raw trailing significand.
    #[must_use]
    pub fn subnormal(negative: bool, significand: F::Bits) -> Self {
        Self::from_fields(negative, 0, significand)
    }

    /// A normal value from its unbiased exponent and significand with
    /// the implicit leading one present in bit `S`.
    ///
    /// The significand must not have overflowed into bit `S + 1`; a
    /// caller holding such a value has to shift and bump the exponent
    /// first.
    #[must_use]
    pub fn normal(negative: bool, exponent: i32, significand: F::Bits) -> Self {
        debug_assert!((F::EMIN..=F::EMAX).contains(&exponent));
        debug_assert!((significand & !F::significand_mask()) == F::implicit_bit());
        Self::from_fields(
            negative,
            exponent + F::BIAS,
            significand & F::significand_mask(),
        )
    }

    /// Packs raw fields without interpretation: a biased exponent field
    /// and a trailing significand.
    #[must_use]
    pub fn from_triplet(negative: bool, biased_exponent: i32, significand: F::Bits) -> Self {
        Self::from_fields(negative, biased_exponent, significand)
    }

    /// Validating variant of [`Float::from_triplet`] for untrusted
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns [`TripletError`] when either field does not fit the
    /// format.
    pub fn try_from_triplet(
        negative: bool,
        biased_exponent: i32,
        significand: F::Bits,
    ) -> Result<Self, TripletError> {
        if !(0..=F::exponent_max_field()).contains(&biased_exponent) {
            return Err(TripletError::ExponentOutOfRange {
                value: biased_exponent,
                field_bits: F::EXPONENT_BITS,
            });
        }
        if !(significand & !F::significand_mask()).is_zero() {
            return Err(TripletError::SignificandOutOfRange {
                value: significand.as_u128(),
                field_bits: F::SIGNIFICAND_BITS,
            });
        }
        Ok(Self::from_fields(negative, biased_exponent, significand))
    }

    #[inline]
    fn from_fields(negative: bool, biased_exponent: i32, trailing: F::Bits) -> Self {
        debug_assert!((0..=F::exponent_max_field()).contains(&biased_exponent));
        debug_assert!((trailing & !F::significand_mask()).is_zero());
        let sign = if negative {
            F::sign_mask()
        } else {
            F::Bits::zero()
        };
        let exponent = F::Bits::from_u128(u128::from(biased_exponent as u32)) << F::SIGNIFICAND_BITS;
        Self {
            bits: sign | exponent | trailing,
        }
    }

    //
    // classification
    //

    /// Splits the packed word into sign, exponent, and significand and
    /// classifies it.
    pub(crate) fn decompose(self) -> Components<F> {
        let sign = !(self.bits & F::sign_mask()).is_zero();
        let mut exponent =
            ((self.bits >> F::SIGNIFICAND_BITS) & F::exponent_field_mask()).as_u128() as i32;
        let mut significand = self.bits & F::significand_mask();
        let class;

        if exponent == 0 {
            if significand.is_zero() {
                class = FpClass::Zero;
            } else {
                exponent = F::EMIN;
                class = FpClass::Subnormal;
            }
        } else if exponent == F::exponent_max_field() {
            if significand.is_zero() {
                class = FpClass::Infinity;
            } else {
                class = FpClass::Nan;
            }
        } else {
            exponent -= F::BIAS;
            significand = significand | F::implicit_bit();
            class = FpClass::Normal;
        }

        Components {
            class,
            sign,
            exponent,
            significand,
        }
    }

    /// The class of this value.
    #[must_use]
    pub fn classify(self) -> FpClass {
        self.decompose().class
    }

    /// Whether this is a NaN of any payload.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.classify() == FpClass::Nan
    }

    /// Whether this is an infinity of either sign.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        self.classify() == FpClass::Infinity
    }

    /// Whether this is a zero of either sign.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.classify() == FpClass::Zero
    }

    /// Whether this is finite and has its implicit leading one.
    #[must_use]
    pub fn is_normal(self) -> bool {
        self.classify() == FpClass::Normal
    }

    /// Whether this sits between zero and the smallest normal.
    #[must_use]
    pub fn is_subnormal(self) -> bool {
        self.classify() == FpClass::Subnormal
    }

    /// Whether the sign bit is set, NaNs and zeros included.
    #[must_use]
    pub fn is_sign_negative(self) -> bool {
        !(self.bits & F::sign_mask()).is_zero()
    }

    //
    // rounding machinery shared by the operations
    //

    /// Shifts the significand right, returning the shifted-out bits
    /// top-aligned in a full-width round-off word.
    pub(crate) fn decrease_significand(significand: &mut F::Bits, amount: i32) -> F::Bits {
        debug_assert!(amount > 0);
        let width = F::TOTAL_BITS as i32;
        let shifted_out = *significand;

        if amount >= width {
            *significand = F::Bits::zero();
            let amount = amount - width;
            if amount >= width {
                return F::Bits::zero();
            }
            return shifted_out >> amount as u32;
        }

        *significand = *significand >> amount as u32;
        let mask = (F::Bits::one() << amount as u32).wrapping_sub(&F::Bits::one());
        (shifted_out & mask) << (width - amount) as u32
    }

    /// Nearest-even rounding of a significand against its round-off
    /// word.
    fn round_significand_core(significand: &mut F::Bits, roundoff_bits: F::Bits) {
        let midpoint = F::Bits::one() << (F::TOTAL_BITS - 1);

        // the round-off word stands for the infinitely long discarded
        // tail, so its top bit alone decides above/below the midpoint
        if roundoff_bits > midpoint {
            *significand = significand.wrapping_add(&F::Bits::one());
        } else if roundoff_bits == midpoint && significand.is_odd() {
            *significand = significand.wrapping_add(&F::Bits::one());
        }
    }

    /// Rounds a normal significand; `false` means the exponent
    /// overflowed and the caller returns an infinity.
    pub(crate) fn round_significand(
        significand: &mut F::Bits,
        exponent: &mut i32,
        roundoff_bits: F::Bits,
    ) -> bool {
        Self::round_significand_core(significand, roundoff_bits);

        // all-ones rounding up spills into bit S + 1
        let overflow = F::implicit_bit() << 1;
        if *significand == overflow {
            *significand = *significand >> 1;
            if Self::increase_exponent(exponent, 1) {
                return false;
            }
        }
        true
    }

    /// Rounds a subnormal significand; `false` means the round-up
    /// promoted it to the smallest normal.
    pub(crate) fn round_subnormal_significand(
        significand: &mut F::Bits,
        roundoff_bits: F::Bits,
    ) -> bool {
        debug_assert!((*significand & !F::significand_mask()).is_zero());
        Self::round_significand_core(significand, roundoff_bits);
        *significand != F::implicit_bit()
    }

    /// How far the significand must shift left to put the leading one
    /// in bit `S`; negative means it overshot.
    pub(crate) fn significand_adjustment(significand: F::Bits) -> i32 {
        let keybit = F::SIGNIFICAND_BITS as i32;
        match significand.reverse_bit_scan() {
            Some(index) => keybit - index as i32,
            None => keybit,
        }
    }

    /// Raises the exponent, reporting overflow past emax.
    pub(crate) fn increase_exponent(exponent: &mut i32, amount: i32) -> bool {
        *exponent += amount;
        *exponent > F::EMAX
    }

    /// Lowers the exponent, clamping at emin; a non-zero return is the
    /// amount of underflow swallowed by the clamp.
    pub(crate) fn decrease_exponent(exponent: &mut i32, amount: i32) -> i32 {
        *exponent -= amount;
        let diff = *exponent - F::EMIN;
        if diff < 0 {
            *exponent = F::EMIN;
            -diff
        } else {
            0
        }
    }
}

impl<F: Format> Default for Float<F> {
    /// Positive zero.
    #[inline]
    fn default() -> Self {
        Self::zero(false)
    }
}

impl<F: Format> fmt::Debug for Float<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:x})", F::NAME, self.bits)
    }
}

impl<F: Format> fmt::LowerHex for Float<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.bits, f)
    }
}
