//! Addition, subtraction, multiplication, division, and negation.

use core::ops::{Add, Div, Mul, Neg, Sub};

use fpemu_wideint::Word;
use num_traits::One;
use num_traits::Zero;
use num_traits::ops::wrapping::{WrappingAdd, WrappingNeg, WrappingSub};

use crate::float::{Float, FpClass};
use crate::format::Format;

impl<F: Format> Add for Float<F> {
    type Output = Self;

    fn add(self, addend: Self) -> Self {
        let mut l = self.decompose();
        let mut r = addend.decompose();

        if l.class == FpClass::Nan {
            return self;
        } else if r.class == FpClass::Nan {
            return addend;
        }

        if l.class == FpClass::Zero {
            if r.class == FpClass::Zero && r.sign != l.sign {
                return Self::zero(false);
            }
            return addend;
        } else if r.class == FpClass::Zero {
            return self;
        }

        if l.class == FpClass::Infinity {
            if r.class == FpClass::Infinity && r.sign != l.sign {
                return Self::indeterminate_nan();
            }
            return self;
        } else if r.class == FpClass::Infinity {
            return addend;
        }

        let width = F::TOTAL_BITS;
        let mut roundoff_bits = F::Bits::zero();

        // make exponents match
        let exponent_diff = l.exponent - r.exponent;
        if exponent_diff > 0 {
            r.exponent += exponent_diff;
            roundoff_bits = Self::decrease_significand(&mut r.significand, exponent_diff);
        } else if exponent_diff < 0 {
            l.exponent -= exponent_diff;
            roundoff_bits = Self::decrease_significand(&mut l.significand, -exponent_diff);
        }

        let sign;
        let mut exponent = l.exponent;
        let mut significand;

        if l.sign != r.sign {
            match l.significand.cmp(&r.significand) {
                core::cmp::Ordering::Greater => {
                    significand = l.significand.wrapping_sub(&r.significand);
                    sign = l.sign;
                }
                core::cmp::Ordering::Less => {
                    significand = r.significand.wrapping_sub(&l.significand);
                    sign = r.sign;
                }
                core::cmp::Ordering::Equal => {
                    // a - a => 0
                    return Self::zero(false);
                }
            }

            if !roundoff_bits.is_zero() {
                // the round-off bits belong to the subtrahend, so their
                // subtraction borrows out of the difference
                significand = significand.wrapping_sub(&F::Bits::one());

                // a small round-off becomes a large one under subtraction
                roundoff_bits = roundoff_bits.wrapping_neg();

                // the borrow may have taken the leading bit with it
                if (significand & F::implicit_bit()).is_zero() {
                    significand = significand << 1;
                    significand = significand | (roundoff_bits >> (width - 1));
                    roundoff_bits = roundoff_bits << 1;
                    exponent -= 1;
                }

                if !Self::round_significand(&mut significand, &mut exponent, roundoff_bits) {
                    return Self::infinity(sign);
                }
            }

            let distance = Self::significand_adjustment(significand);
            debug_assert!(distance >= 0);

            if distance > 0 {
                let underflow = Self::decrease_exponent(&mut exponent, distance);
                if underflow != 0 {
                    // not enough exponent range left: subnormal
                    let shift_amount = distance - underflow;
                    if shift_amount > 0 {
                        significand = significand << shift_amount as u32;
                    } else if shift_amount < 0 {
                        if -shift_amount < width as i32 {
                            significand = significand >> (-shift_amount) as u32;
                        } else {
                            return Self::zero(false);
                        }
                    }
                    return Self::subnormal(sign, significand);
                }
                significand = significand << distance as u32;
            }
        } else {
            significand = l.significand.wrapping_add(&r.significand);
            sign = l.sign;

            let topbit = F::implicit_bit();
            let overflowbit = topbit << 1;

            // the sum can spill one bit past the implicit one
            if !(significand & overflowbit).is_zero() {
                roundoff_bits = roundoff_bits >> 1;
                roundoff_bits = roundoff_bits | ((significand & F::Bits::one()) << (width - 1));
                significand = significand >> 1;
                if Self::increase_exponent(&mut exponent, 1) {
                    return Self::infinity(sign);
                }
            }

            if !Self::round_significand(&mut significand, &mut exponent, roundoff_bits) {
                return Self::infinity(sign);
            }

            // two subnormals may sum below the implicit bit
            if (significand & topbit).is_zero() {
                return Self::subnormal(sign, significand);
            }
        }

        Self::normal(sign, exponent, significand)
    }
}

impl<F: Format> Sub for Float<F> {
    type Output = Self;

    fn sub(self, subtrahend: Self) -> Self {
        // NaN propagation keeps the operand unnegated
        if self.decompose().class == FpClass::Nan {
            return self;
        } else if subtrahend.decompose().class == FpClass::Nan {
            return subtrahend;
        }

        self + (-subtrahend)
    }
}

impl<F: Format> Mul for Float<F> {
    type Output = Self;

    fn mul(self, factor: Self) -> Self {
        let l = self.decompose();
        let r = factor.decompose();

        if l.class == FpClass::Nan {
            return self;
        } else if r.class == FpClass::Nan {
            return factor;
        }

        if l.class == FpClass::Infinity {
            if r.class == FpClass::Zero {
                return Self::indeterminate_nan();
            }
            return Self::from_bits(self.bits ^ (F::sign_mask() & factor.bits));
        } else if r.class == FpClass::Infinity {
            if l.class == FpClass::Zero {
                return Self::indeterminate_nan();
            }
            return Self::from_bits(factor.bits ^ (F::sign_mask() & self.bits));
        }

        let sign = l.sign ^ r.sign;

        if l.class == FpClass::Zero || r.class == FpClass::Zero {
            return Self::zero(sign);
        }

        let mut exponent = l.exponent + r.exponent;
        if exponent > F::EMAX {
            return Self::infinity(sign);
        }

        let width = F::TOTAL_BITS;
        let sig_bits = F::SIGNIFICAND_BITS;

        // the high word of the double-width product carries the result,
        // the low word becomes the top-aligned round-off
        let (product_low, product_high) = l.significand.multiply_extended(r.significand);
        let mut significand = (product_high << (width - sig_bits)) | (product_low >> sig_bits);
        let mut roundoff_bits = (product_low & F::significand_mask()) << (width - sig_bits);

        if significand.is_zero() {
            // both inputs subnormal: everything sits in the round-off
            significand = roundoff_bits;
            roundoff_bits = F::Bits::zero();

            if Self::decrease_exponent(&mut exponent, sig_bits as i32) != 0 {
                return Self::zero(sign);
            }
        }

        debug_assert!(!significand.is_zero());

        let distance = Self::significand_adjustment(significand);

        if distance > 0 {
            // a subnormal input left the leading one short
            let underflow = Self::decrease_exponent(&mut exponent, distance);
            if underflow != 0 {
                let remaining = distance - underflow;
                if remaining < 0 {
                    let merged = Self::decrease_significand(&mut significand, -remaining);
                    roundoff_bits = if -remaining < width as i32 {
                        merged | (roundoff_bits >> (-remaining) as u32)
                    } else {
                        merged
                    };
                } else if remaining > 0 {
                    significand = significand << remaining as u32;
                    significand = significand | (roundoff_bits >> (width - remaining as u32));
                    roundoff_bits = roundoff_bits << remaining as u32;
                }

                if !Self::round_subnormal_significand(&mut significand, roundoff_bits) {
                    return Self::normal(sign, F::EMIN, significand);
                }
                return Self::subnormal(sign, significand);
            }

            significand = significand << distance as u32;
            significand = significand | (roundoff_bits >> (width - distance as u32));
            roundoff_bits = roundoff_bits << distance as u32;
        } else if distance < 0 {
            // full significands overflow by at most one bit
            debug_assert!(distance == -1);

            roundoff_bits = roundoff_bits >> 1;
            roundoff_bits = roundoff_bits | (significand << (width - 1));
            significand = significand >> 1;

            if Self::increase_exponent(&mut exponent, 1) {
                return Self::infinity(sign);
            }
        }

        if exponent < F::EMIN {
            while exponent < F::EMIN {
                exponent += 1;
                roundoff_bits = roundoff_bits >> 1;
                roundoff_bits = roundoff_bits | ((significand & F::Bits::one()) << (width - 1));
                significand = significand >> 1;

                if significand.is_zero() && roundoff_bits.is_zero() {
                    return Self::zero(sign);
                }
            }

            if Self::round_subnormal_significand(&mut significand, roundoff_bits) {
                return Self::subnormal(sign, significand);
            }
            // the round-up reached the smallest normal; exponent is emin
        } else if !Self::round_significand(&mut significand, &mut exponent, roundoff_bits) {
            return Self::infinity(sign);
        }

        Self::normal(sign, exponent, significand)
    }
}

impl<F: Format> Float<F> {
    /// Two passes of shift-subtract division: the first fills the
    /// significand, the second fills the round-off word.
    fn long_division(dividend: &mut F::Bits, divisor: F::Bits) -> (F::Bits, F::Bits) {
        let quotient = Self::long_division_loop(dividend, divisor);
        let mut roundoff_bits = Self::long_division_loop(dividend, divisor);

        roundoff_bits = roundoff_bits << (F::TOTAL_BITS - (F::SIGNIFICAND_BITS + 1));

        // a remainder after both passes means the fraction repeats below
        // the round-off window, so a tie is really above the midpoint
        let midpoint = F::Bits::one() << (F::TOTAL_BITS - 1);
        if !dividend.is_zero() && roundoff_bits == midpoint {
            roundoff_bits = roundoff_bits.wrapping_add(&F::Bits::one());
        }

        (quotient, roundoff_bits)
    }

    fn long_division_loop(dividend: &mut F::Bits, divisor: F::Bits) -> F::Bits {
        let mut quotient = F::Bits::zero();

        let mut bit = F::SIGNIFICAND_BITS as i32;
        while !dividend.is_zero() && bit >= 0 {
            if *dividend >= divisor {
                quotient = quotient | (F::Bits::one() << bit as u32);
                *dividend = dividend.wrapping_sub(&divisor);
            }
            *dividend = *dividend << 1;
            bit -= 1;
        }

        quotient
    }
}

impl<F: Format> Div for Float<F> {
    type Output = Self;

    fn div(self, denominator: Self) -> Self {
        let mut l = self.decompose();
        let mut r = denominator.decompose();

        if l.class == FpClass::Nan {
            return self;
        } else if r.class == FpClass::Nan {
            return denominator;
        }

        let sign = l.sign ^ r.sign;

        if l.class == FpClass::Zero {
            if r.class == FpClass::Zero {
                return Self::indeterminate_nan();
            }
            return Self::zero(sign);
        } else if r.class == FpClass::Zero {
            return Self::infinity(sign);
        }

        if l.class == FpClass::Infinity {
            if r.class == FpClass::Infinity {
                return Self::indeterminate_nan();
            }
            return Self::infinity(sign);
        } else if r.class == FpClass::Infinity {
            return Self::zero(sign);
        }

        // renormalize subnormal inputs so dividend and divisor stay close
        // and the quotient cannot overflow the loop
        if l.class == FpClass::Subnormal {
            let adjustment = Self::significand_adjustment(l.significand);
            l.significand = l.significand << adjustment as u32;
            l.exponent -= adjustment;
        }
        if r.class == FpClass::Subnormal {
            let adjustment = Self::significand_adjustment(r.significand);
            r.significand = r.significand << adjustment as u32;
            r.exponent -= adjustment;
        }

        let mut exponent = l.exponent - r.exponent;

        let mut dividend = l.significand;
        let divisor = r.significand;

        // line up the quotient's leading one with bit S
        while dividend < divisor {
            dividend = dividend << 1;
            exponent -= 1;
        }

        let (mut significand, roundoff_bits) = Self::long_division(&mut dividend, divisor);

        let width = F::TOTAL_BITS;

        if significand < F::implicit_bit() {
            debug_assert!(exponent == F::EMIN);
            if Self::round_subnormal_significand(&mut significand, roundoff_bits) {
                return Self::subnormal(sign, significand);
            }
            // promoted to the smallest normal
        } else if exponent < F::EMIN {
            let mut roundoff_bits = roundoff_bits;
            while exponent < F::EMIN {
                exponent += 1;
                roundoff_bits = roundoff_bits >> 1;
                roundoff_bits = roundoff_bits | ((significand & F::Bits::one()) << (width - 1));
                significand = significand >> 1;

                if significand.is_zero() && roundoff_bits.is_zero() {
                    return Self::zero(sign);
                }
            }

            if Self::round_subnormal_significand(&mut significand, roundoff_bits) {
                return Self::subnormal(sign, significand);
            }
            // promoted to the smallest normal; exponent is emin
        } else if exponent > F::EMAX {
            return Self::infinity(sign);
        } else if !Self::round_significand(&mut significand, &mut exponent, roundoff_bits) {
            return Self::infinity(sign);
        }

        Self::normal(sign, exponent, significand)
    }
}

impl<F: Format> Neg for Float<F> {
    type Output = Self;

    /// Flips the sign bit; NaNs included, like the hardware negate.
    #[inline]
    fn neg(self) -> Self {
        Self::from_bits(self.bits ^ F::sign_mask())
    }
}
