//! Differential fuzzing of binary32/binary64 arithmetic against the
//! host FPU.

#![no_main]

use arbitrary::Arbitrary;
use fpemu_core::{Float32, Float64};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Pair {
    a: u64,
    b: u64,
}

fuzz_target!(|pair: Pair| {
    let (a32, b32) = (pair.a as u32, pair.b as u32);
    if !f32::from_bits(a32).is_nan() && !f32::from_bits(b32).is_nan() {
        let (sa, sb) = (Float32::from_bits(a32), Float32::from_bits(b32));
        let (fa, fb) = (f32::from_bits(a32), f32::from_bits(b32));

        for (software, hardware) in [
            (sa + sb, fa + fb),
            (sa - sb, fa - fb),
            (sa * sb, fa * fb),
            (sa / sb, fa / fb),
        ] {
            if hardware.is_nan() {
                assert!(software.is_nan());
            } else {
                assert_eq!(software.to_bits(), hardware.to_bits());
            }
        }
    }

    if !f64::from_bits(pair.a).is_nan() && !f64::from_bits(pair.b).is_nan() {
        let (sa, sb) = (Float64::from_bits(pair.a), Float64::from_bits(pair.b));
        let (fa, fb) = (f64::from_bits(pair.a), f64::from_bits(pair.b));

        for (software, hardware) in [
            (sa + sb, fa + fb),
            (sa - sb, fa - fb),
            (sa * sb, fa * fb),
            (sa / sb, fa / fb),
        ] {
            if hardware.is_nan() {
                assert!(software.is_nan());
            } else {
                assert_eq!(software.to_bits(), hardware.to_bits());
            }
        }
    }
});
