//! Fuzzes the recursive wide integers against the host's native types.

#![no_main]

use arbitrary::Arbitrary;
use fpemu_wideint::{U128, Word};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    a: u128,
    b: u128,
    shift: u8,
}

fuzz_target!(|input: Input| {
    let (a, b) = (input.a, input.b);
    let (x, y) = (U128::from(a), U128::from(b));

    assert_eq!(u128::from(x + y), a.wrapping_add(b));
    assert_eq!(u128::from(x - y), a.wrapping_sub(b));
    assert_eq!(u128::from(x * y), a.wrapping_mul(b));
    assert_eq!(x.cmp(&y), a.cmp(&b));

    let shift = u32::from(input.shift) & 127;
    assert_eq!(u128::from(x << shift), a << shift);
    assert_eq!(u128::from(x >> shift), a >> shift);

    if b != 0 {
        let (q, r) = x.div_rem(y);
        assert_eq!(u128::from(q), a / b);
        assert_eq!(u128::from(r), a % b);
    }

    // the extended product's low half is the wrapping product
    let (low, high) = x.multiply_extended(y);
    assert_eq!(u128::from(low), a.wrapping_mul(b));
    if a.leading_zeros() + b.leading_zeros() >= 128 {
        assert_eq!(u128::from(high), 0);
    }
});
