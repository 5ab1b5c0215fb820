//! Fuzzes the conversion ladder: width changes against the host casts,
//! and integer bridges in both directions.

#![no_main]

use arbitrary::Arbitrary;
use fpemu_core::{Binary32, Binary64, Float32, Float64};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    bits64: u64,
    int64: i64,
}

fuzz_target!(|input: Input| {
    let wide = f64::from_bits(input.bits64);
    if !wide.is_nan() {
        // narrowing matches the host cast, overflow and subnormals included
        let narrowed: Float32 = Float64::from_bits(input.bits64).convert();
        assert_eq!(narrowed.to_bits(), (wide as f32).to_bits());

        // widening back through binary64 matches the host as well
        let rewidened = narrowed.convert::<Binary64>();
        assert_eq!(
            rewidened.to_bits(),
            f64::from(f32::from_bits(narrowed.to_bits())).to_bits()
        );
    }

    let narrow = f32::from_bits(input.bits64 as u32);
    if !narrow.is_nan() {
        let through: Float32 = Float32::from_f32(narrow).convert::<Binary32>();
        assert_eq!(through.to_bits(), narrow.to_bits());
    }

    // integer bridges against the host conversions
    assert_eq!(
        Float64::from(input.int64).to_bits(),
        (input.int64 as f64).to_bits()
    );
    assert_eq!(
        Float32::from(input.int64).to_bits(),
        (input.int64 as f32).to_bits()
    );
    assert_eq!(
        Float64::from(input.int64 as u64).to_bits(),
        (input.int64 as u64 as f64).to_bits()
    );
});
