//! Property tests against the host FPU and the algebraic laws the
//! emulation must satisfy.
//!
//! Operand bit patterns are drawn uniformly, so subnormals, infinities,
//! and NaNs all appear. Cases whose hardware result is a NaN only
//! compare the class: NaN payload choice is platform detail.

use fpemu_core::{Float16, Float32, Float64};
use proptest::prelude::*;

fn agree32(software: Float32, hardware: f32, context: &str) -> Result<(), TestCaseError> {
    if hardware.is_nan() {
        prop_assert!(software.is_nan(), "{context}: expected NaN, got {software:?}");
    } else {
        prop_assert_eq!(
            software.to_bits(),
            hardware.to_bits(),
            "{}: {:?} != {:e}",
            context,
            software,
            hardware
        );
    }
    Ok(())
}

fn agree64(software: Float64, hardware: f64, context: &str) -> Result<(), TestCaseError> {
    if hardware.is_nan() {
        prop_assert!(software.is_nan(), "{context}: expected NaN, got {software:?}");
    } else {
        prop_assert_eq!(
            software.to_bits(),
            hardware.to_bits(),
            "{}: {:?} != {:e}",
            context,
            software,
            hardware
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4096))]

    #[test]
    fn binary32_arithmetic_matches_hardware(a: u32, b: u32) {
        prop_assume!(!f32::from_bits(a).is_nan() && !f32::from_bits(b).is_nan());
        let (sa, sb) = (Float32::from_bits(a), Float32::from_bits(b));
        let (fa, fb) = (f32::from_bits(a), f32::from_bits(b));

        agree32(sa + sb, fa + fb, "add")?;
        agree32(sa - sb, fa - fb, "sub")?;
        agree32(sa * sb, fa * fb, "mul")?;
        agree32(sa / sb, fa / fb, "div")?;
    }

    #[test]
    fn binary64_arithmetic_matches_hardware(a: u64, b: u64) {
        prop_assume!(!f64::from_bits(a).is_nan() && !f64::from_bits(b).is_nan());
        let (sa, sb) = (Float64::from_bits(a), Float64::from_bits(b));
        let (fa, fb) = (f64::from_bits(a), f64::from_bits(b));

        agree64(sa + sb, fa + fb, "add")?;
        agree64(sa - sb, fa - fb, "sub")?;
        agree64(sa * sb, fa * fb, "mul")?;
        agree64(sa / sb, fa / fb, "div")?;
    }

    #[test]
    fn binary16_arithmetic_matches_double_rounded_hardware(a: u16, b: u16) {
        let (sa, sb) = (Float16::from_bits(a), Float16::from_bits(b));
        let (fa, fb) = (sa.to_f32(), sb.to_f32());

        for (software, hardware) in [
            (sa + sb, fa + fb),
            (sa - sb, fa - fb),
            (sa * sb, fa * fb),
            (sa / sb, fa / fb),
        ] {
            let reference = Float16::from_f32(hardware);
            if reference.is_nan() {
                prop_assert!(software.is_nan());
            } else {
                prop_assert_eq!(software.to_bits(), reference.to_bits());
            }
        }
    }

    #[test]
    fn addition_and_multiplication_commute(a: u32, b: u32) {
        prop_assume!(!f32::from_bits(a).is_nan() && !f32::from_bits(b).is_nan());
        let (x, y) = (Float32::from_bits(a), Float32::from_bits(b));
        prop_assert_eq!((x + y).to_bits(), (y + x).to_bits());
        prop_assert_eq!((x * y).to_bits(), (y * x).to_bits());
    }

    #[test]
    fn identities_and_annihilators(bits: u32) {
        let x = Float32::from_bits(bits);
        prop_assume!(!x.is_nan());
        let zero = Float32::zero(false);
        let one = Float32::from_f32(1.0);

        // -0 + 0 is +0, so the additive identity holds as a value
        let sum = x + zero;
        prop_assert!(sum == x);
        if !x.is_zero() {
            prop_assert_eq!(sum.to_bits(), bits);
        }
        prop_assert_eq!((x * one).to_bits(), bits);

        if !x.is_infinite() {
            let product = x * zero;
            prop_assert!(product.is_zero());
            prop_assert_eq!(product.is_sign_negative(), x.is_sign_negative());

            // x - x is exactly +0 under round-to-nearest
            prop_assert_eq!((x - x).to_bits(), 0);
        }
    }

    #[test]
    fn sign_laws(a: u32, b: u32) {
        let x = Float32::from_bits(a);
        prop_assert_eq!((-(-x)).to_bits(), a);

        let y = Float32::from_bits(b);
        prop_assume!(!x.is_nan() && !y.is_nan());
        prop_assume!(!x.is_zero() && !y.is_zero());
        let product = x * y;
        if !product.is_nan() {
            prop_assert_eq!(
                product.is_sign_negative(),
                x.is_sign_negative() ^ y.is_sign_negative()
            );
        }
    }

    #[test]
    fn comparisons_match_hardware(a: u32, b: u32) {
        let (x, y) = (Float32::from_bits(a), Float32::from_bits(b));
        let (fa, fb) = (f32::from_bits(a), f32::from_bits(b));

        prop_assert_eq!(x == y, fa == fb);
        prop_assert_eq!(x != y, fa != fb);
        prop_assert_eq!(x < y, fa < fb);
        prop_assert_eq!(x <= y, fa <= fb);
        prop_assert_eq!(x > y, fa > fb);
        prop_assert_eq!(x >= y, fa >= fb);
    }

    #[test]
    fn comparison_internal_consistency(a: u32, b: u32) {
        let (x, y) = (Float32::from_bits(a), Float32::from_bits(b));
        if x < y {
            prop_assert!(x != y);
            prop_assert!(!(x > y));
        }
        if !x.is_nan() && !y.is_nan() {
            prop_assert_eq!(x <= y, x < y || x == y);
        }
    }

    #[test]
    fn narrowing_matches_the_host_cast(bits: u64) {
        let wide = f64::from_bits(bits);
        prop_assume!(!wide.is_nan());
        let narrowed: Float32 = Float64::from_bits(bits).convert();
        prop_assert_eq!(narrowed.to_bits(), (wide as f32).to_bits());
    }

    #[test]
    fn widening_matches_the_host_cast(bits: u32) {
        let narrow = f32::from_bits(bits);
        prop_assume!(!narrow.is_nan());
        let widened = Float32::from_bits(bits).convert::<fpemu_core::Binary64>();
        prop_assert_eq!(widened.to_bits(), f64::from(narrow).to_bits());
    }

    #[test]
    fn host_float_round_trips(bits: u32) {
        prop_assume!(!f32::from_bits(bits).is_nan());
        prop_assert_eq!(Float32::from_f32(f32::from_bits(bits)).to_bits(), bits);
        prop_assert_eq!(Float32::from_bits(bits).to_f32().to_bits(), bits);
    }

    #[test]
    fn integer_conversions_match_the_host(n: i64) {
        prop_assert_eq!(Float64::from(n).to_bits(), (n as f64).to_bits());
        prop_assert_eq!(Float32::from(n).to_bits(), (n as f32).to_bits());

        let m = n as u64;
        prop_assert_eq!(Float64::from(m).to_bits(), (m as f64).to_bits());
        prop_assert_eq!(Float32::from(m).to_bits(), (m as f32).to_bits());

        let k = n as i32;
        prop_assert_eq!(Float64::from(k).to_bits(), (f64::from(k)).to_bits());
        prop_assert_eq!(Float32::from(k).to_bits(), (k as f32).to_bits());
    }

    #[test]
    fn in_range_truncation_matches_the_host(n: i32) {
        // pick a float whose truncation stays in range
        let x = f64::from(n) / 16.0;
        prop_assert_eq!(Float64::from_f64(x).to_i32(), x as i32);
        prop_assert_eq!(Float64::from_f64(x).to_i64(), x as i64);
    }

    #[test]
    fn binary128_round_trips_binary64(bits: u64) {
        prop_assume!(!f64::from_bits(bits).is_nan());
        let up = Float64::from_bits(bits).convert::<fpemu_core::Binary128>();
        let down: Float64 = up.convert();
        prop_assert_eq!(down.to_bits(), bits);
    }

    #[test]
    fn binary128_multiplication_is_exact_where_binary64_is(a: u32, b: u32) {
        // binary64 products of binary32 inputs are exact, and binary128
        // holds them with room to spare; the two ladders must agree
        prop_assume!(!f32::from_bits(a).is_nan() && !f32::from_bits(b).is_nan());
        let via64 = Float64::from(Float32::from_bits(a)) * Float64::from(Float32::from_bits(b));
        let via128 = Float32::from_bits(a).convert::<fpemu_core::Binary128>()
            * Float32::from_bits(b).convert::<fpemu_core::Binary128>();
        let down: Float64 = via128.convert();
        if via64.is_nan() {
            prop_assert!(down.is_nan());
        } else {
            prop_assert_eq!(down.to_bits(), via64.to_bits());
        }
    }
}

#[test]
fn comparison_seed_cases() {
    let one = Float32::from_f32(1.0);
    let two = Float32::from_f32(2.0);
    assert!(one < two);
    assert!(one <= two);
    assert!(two > one);
    assert!(two >= one);
    assert!(one == one);
    assert!(one != two);

    // equality treats zeros as one value but NaN as nothing
    assert_eq!(Float32::zero(false), Float32::zero(true));
    assert_ne!(
        Float32::indeterminate_nan(),
        Float32::indeterminate_nan()
    );

    let narrowed: Float16 = Float32::from_f32(1.5).convert::<fpemu_core::Binary16>();
    assert_eq!(narrowed.to_bits(), 0x3E00);
}
