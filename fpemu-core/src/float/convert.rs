//! Width conversion, integer bridging, and host-float bridging.

use fpemu_wideint::Word;
use num_traits::One;
use num_traits::Zero;
use num_traits::ops::wrapping::WrappingSub;

use crate::float::{Float, FpClass};
use crate::format::{Binary16, Binary32, Binary64, Format};

impl<F: Format> Float<F> {
    /// Converts to another binary format, rounding to nearest-even when
    /// narrowing.
    #[must_use]
    pub fn convert<G: Format>(self) -> Float<G> {
        if G::TOTAL_BITS == F::TOTAL_BITS && G::EXPONENT_BITS == F::EXPONENT_BITS {
            return Float::<G>::from_bits(G::Bits::from_u128(self.bits.as_u128()));
        }
        if G::SIGNIFICAND_BITS > F::SIGNIFICAND_BITS {
            self.widen()
        } else {
            self.narrow()
        }
    }

    /// Exact conversion into a strictly wider format.
    fn widen<G: Format>(self) -> Float<G> {
        debug_assert!(G::SIGNIFICAND_BITS > F::SIGNIFICAND_BITS);
        let bitdiff = G::SIGNIFICAND_BITS - F::SIGNIFICAND_BITS;

        let sign = self.is_sign_negative();
        let mut exponent =
            ((self.bits >> F::SIGNIFICAND_BITS) & F::exponent_field_mask()).as_u128() as i32;
        let mut narrow_significand = self.bits & F::significand_mask();

        if exponent == F::exponent_max_field() {
            if narrow_significand.is_zero() {
                return Float::<G>::infinity(sign);
            }
            // preserve the NaN payload
            let payload = G::Bits::from_u128(narrow_significand.as_u128()) << bitdiff;
            return Float::<G>::from_triplet(sign, G::exponent_max_field(), payload);
        }

        if exponent == 0 {
            if narrow_significand.is_zero() {
                return Float::<G>::zero(sign);
            }

            // subnormals of the narrow format are normals of the wide one
            exponent = F::EMIN;
            let distance = Self::significand_adjustment(narrow_significand);
            debug_assert!(distance > 0);
            narrow_significand = narrow_significand << distance as u32;
            narrow_significand = narrow_significand & F::significand_mask();
            exponent -= distance; // cannot underflow
        } else {
            exponent -= F::BIAS;
        }

        let wide_significand = G::Bits::from_u128(narrow_significand.as_u128()) << bitdiff;
        Float::<G>::from_triplet(sign, exponent + G::BIAS, wide_significand)
    }

    /// Rounding conversion into a strictly narrower format.
    fn narrow<G: Format>(self) -> Float<G> {
        debug_assert!(G::SIGNIFICAND_BITS < F::SIGNIFICAND_BITS);
        let bitdiff = F::SIGNIFICAND_BITS - G::SIGNIFICAND_BITS;
        let narrow_width = G::TOTAL_BITS;

        let sign = self.is_sign_negative();
        let mut exponent =
            ((self.bits >> F::SIGNIFICAND_BITS) & F::exponent_field_mask()).as_u128() as i32;
        let wide_significand = self.bits & F::significand_mask();

        if exponent == 0 {
            // wide subnormals sit far below the narrow format's range
            return Float::<G>::zero(sign);
        } else if exponent == F::exponent_max_field() {
            if wide_significand.is_zero() {
                return Float::<G>::infinity(sign);
            }
            // keep the top of the payload; if nothing survives the shift
            // the result must still be a NaN, so set the quiet bit
            let mut payload = G::Bits::from_u128((wide_significand >> bitdiff).as_u128());
            if payload.is_zero() {
                payload = G::Bits::one() << (G::SIGNIFICAND_BITS - 1);
            }
            return Float::<G>::from_triplet(sign, G::exponent_max_field(), payload);
        }

        exponent -= F::BIAS;
        let wide_significand = wide_significand | F::implicit_bit();

        let mut narrow_significand = G::Bits::from_u128((wide_significand >> bitdiff).as_u128());

        // shifted-out bits, top-aligned into a narrow-width round-off
        // word; bits below that window fold into its lowest bit so a
        // midpoint stays distinguishable from just-above-midpoint
        let mask = (F::Bits::one() << bitdiff).wrapping_sub(&F::Bits::one());
        let shifted_out = wide_significand & mask;
        let mut roundoff_bits = if bitdiff <= narrow_width {
            G::Bits::from_u128(shifted_out.as_u128()) << (narrow_width - bitdiff)
        } else {
            let dropped = bitdiff - narrow_width;
            let top = G::Bits::from_u128((shifted_out >> dropped).as_u128());
            let dropped_mask = (F::Bits::one() << dropped).wrapping_sub(&F::Bits::one());
            if (shifted_out & dropped_mask).is_zero() {
                top
            } else {
                top | G::Bits::one()
            }
        };

        if exponent < G::EMIN {
            // drift right toward the narrow format's subnormal range
            while exponent < G::EMIN {
                exponent += 1;
                roundoff_bits = roundoff_bits >> 1;
                roundoff_bits =
                    roundoff_bits | ((narrow_significand & G::Bits::one()) << (narrow_width - 1));
                narrow_significand = narrow_significand >> 1;

                if narrow_significand.is_zero() && roundoff_bits.is_zero() {
                    return Float::<G>::zero(sign);
                }
            }

            if Float::<G>::round_subnormal_significand(&mut narrow_significand, roundoff_bits) {
                return Float::<G>::subnormal(sign, narrow_significand);
            }
            // promoted to the smallest normal; exponent is emin
        } else if exponent > G::EMAX {
            return Float::<G>::infinity(sign);
        } else if !Float::<G>::round_significand(&mut narrow_significand, &mut exponent, roundoff_bits)
        {
            return Float::<G>::infinity(sign);
        }

        Float::<G>::normal(sign, exponent, narrow_significand)
    }

    //
    // integer -> float
    //

    fn from_int_parts(magnitude: u128, sign: bool) -> Self {
        if magnitude == 0 {
            return Self::zero(false);
        }

        let index = 127 - magnitude.leading_zeros();
        let mut exponent = index as i32;
        if exponent > F::EMAX {
            return Self::infinity(sign);
        }

        let width = F::TOTAL_BITS;
        let bitdiff = F::SIGNIFICAND_BITS as i32 - index as i32;
        let mut significand;

        if bitdiff < 0 {
            // more integer bits than the significand holds: shift right
            // and round on what falls out
            let dropped = (-bitdiff) as u32;
            significand = F::Bits::from_u128(magnitude >> dropped);

            let shifted_out = magnitude & ((1u128 << dropped) - 1);
            let roundoff_bits = if dropped <= width {
                F::Bits::from_u128(shifted_out) << (width - dropped)
            } else {
                let below = dropped - width;
                let top = F::Bits::from_u128(shifted_out >> below);
                if shifted_out & ((1u128 << below) - 1) == 0 {
                    top
                } else {
                    top | F::Bits::one()
                }
            };

            if !Self::round_significand(&mut significand, &mut exponent, roundoff_bits) {
                return Self::infinity(sign);
            }
        } else {
            significand = F::Bits::from_u128(magnitude) << bitdiff as u32;
        }

        Self::normal(sign, exponent, significand)
    }

    //
    // float -> integer
    //

    fn to_int_parts(self, target_bits: u32) -> IntOutcome {
        let c = self.decompose();

        match c.class {
            FpClass::Infinity => return IntOutcome::OutOfRange(c.sign),
            FpClass::Nan => return IntOutcome::Invalid,
            FpClass::Zero | FpClass::Subnormal => return IntOutcome::Value(0),
            FpClass::Normal => {}
        }

        if c.exponent < 0 {
            return IntOutcome::Value(0);
        }

        let intermediate_bits = F::TOTAL_BITS.max(target_bits) as i32;
        let mut value = c.significand.as_u128() as i128;

        // conversion truncates toward zero, so the fraction below bit S
        // is simply shifted away
        let bitshift = F::SIGNIFICAND_BITS as i32 - c.exponent;
        if bitshift > 0 {
            if bitshift > intermediate_bits {
                return IntOutcome::Invalid;
            }
            value = if bitshift >= 128 { 0 } else { value >> bitshift };
        } else if bitshift < 0 {
            let up = -bitshift;
            if up > intermediate_bits {
                return IntOutcome::OutOfRange(c.sign);
            }
            value = if up >= 128 { 0 } else { value << up };
        }

        if c.sign {
            value = value.wrapping_neg();
        }
        IntOutcome::Value(value)
    }

    //
    // host floats
    //

    /// Builds a value from a host `f32`, exactly when widening and with
    /// nearest-even rounding when narrowing.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Float::<Binary32>::from_bits(value.to_bits()).convert()
    }

    /// Converts to a host `f32`.
    #[must_use]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.convert::<Binary32>().to_bits())
    }

    /// Builds a value from a host `f64`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Float::<Binary64>::from_bits(value.to_bits()).convert()
    }

    /// Converts to a host `f64`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.convert::<Binary64>().to_bits())
    }
}

/// Routed result of a float-to-integer conversion, before the sentinel
/// policy picks concrete bits.
enum IntOutcome {
    Value(i128),
    /// NaN, or the magnitude vanished below the intermediate width.
    Invalid,
    /// Infinity, or the magnitude overflowed the intermediate width.
    OutOfRange(bool),
}

macro_rules! impl_int_conversions {
    ($(($signed:ty, $unsigned:ty, $to_signed:ident, $to_unsigned:ident)),* $(,)?) => {
        impl<F: Format> Float<F> {
            $(
                /// Truncating conversion; out-of-range values produce the
                /// configured sentinel.
                #[must_use]
                pub fn $to_signed(self) -> $signed {
                    match self.to_int_parts(<$signed>::BITS) {
                        IntOutcome::Value(v) => v as $signed,
                        outcome => sentinel::<$signed>(outcome),
                    }
                }

                /// Truncating conversion; out-of-range values produce the
                /// configured sentinel.
                #[must_use]
                pub fn $to_unsigned(self) -> $unsigned {
                    match self.to_int_parts(<$unsigned>::BITS) {
                        IntOutcome::Value(v) => v as $unsigned,
                        outcome => sentinel::<$unsigned>(outcome),
                    }
                }
            )*
        }

        $(
            impl<F: Format> From<$signed> for Float<F> {
                #[inline]
                fn from(value: $signed) -> Self {
                    Self::from_int_parts(u128::from(value.unsigned_abs()), value < 0)
                }
            }

            impl<F: Format> From<$unsigned> for Float<F> {
                #[inline]
                fn from(value: $unsigned) -> Self {
                    Self::from_int_parts(u128::from(value), false)
                }
            }
        )*
    };
}

impl_int_conversions!(
    (i8, u8, to_i8, to_u8),
    (i16, u16, to_i16, to_u16),
    (i32, u32, to_i32, to_u32),
    (i64, u64, to_i64, to_u64),
    (i128, u128, to_i128, to_u128),
);

/// Maps a non-value conversion outcome onto the sentinel the build
/// targets: the x86 integer indefinite under `emulate-intel`, saturation
/// otherwise.
fn sentinel<T: IntSentinel>(outcome: IntOutcome) -> T {
    #[cfg(feature = "emulate-intel")]
    {
        let _ = &outcome;
        T::INDEFINITE
    }
    #[cfg(not(feature = "emulate-intel"))]
    {
        match outcome {
            IntOutcome::Value(_) => unreachable!("handled by the caller"),
            IntOutcome::Invalid => T::ZERO,
            IntOutcome::OutOfRange(true) => T::MIN_SENTINEL,
            IntOutcome::OutOfRange(false) => T::MAX_SENTINEL,
        }
    }
}

/// Per-target sentinel constants for out-of-range conversions.
trait IntSentinel {
    /// What CVTTSS2SI and friends return: zero below the natural int
    /// width, the signed minimum bit pattern at and above it.
    const INDEFINITE: Self;
    const ZERO: Self;
    const MIN_SENTINEL: Self;
    const MAX_SENTINEL: Self;
}

macro_rules! impl_sentinel {
    ($($t:ty),*) => {
        $(
            impl IntSentinel for $t {
                const INDEFINITE: $t = {
                    if <$t>::BITS < 32 || (<$t>::MIN == 0 && <$t>::BITS == 32) {
                        0
                    } else if <$t>::MIN == 0 {
                        // unsigned: the signed minimum bit pattern
                        (<$t>::MAX >> 1) + 1
                    } else {
                        <$t>::MIN
                    }
                };
                const ZERO: $t = 0;
                const MIN_SENTINEL: $t = <$t>::MIN;
                const MAX_SENTINEL: $t = <$t>::MAX;
            }
        )*
    };
}

impl_sentinel!(i8, u8, i16, u16, i32, u32, i64, u64, i128, u128);

// the six directed pairs between the host-width formats

macro_rules! impl_format_from {
    ($($from:ty => $to:ty),* $(,)?) => {
        $(
            impl From<Float<$from>> for Float<$to> {
                #[inline]
                fn from(value: Float<$from>) -> Self {
                    value.convert()
                }
            }
        )*
    };
}

impl_format_from!(
    Binary16 => Binary32,
    Binary16 => Binary64,
    Binary32 => Binary64,
    Binary32 => Binary16,
    Binary64 => Binary16,
    Binary64 => Binary32,
);
