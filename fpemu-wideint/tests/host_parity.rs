//! Property tests pinning the software integers to the host types.
//!
//! Every operation the wide integers implement exists natively at 16, 32,
//! and 128 bits, so the host arithmetic is the oracle: identical inputs
//! must give bit-identical outputs.

use fpemu_wideint::{I16, U128, U16, U32, Word};
use num_traits::ops::wrapping::WrappingNeg;
use proptest::prelude::*;

proptest! {
    #[test]
    fn u16_wrapping_arithmetic_matches_host(a: u16, b: u16) {
        let (x, y) = (U16::from(a), U16::from(b));
        prop_assert_eq!(u16::from(x + y), a.wrapping_add(b));
        prop_assert_eq!(u16::from(x - y), a.wrapping_sub(b));
        prop_assert_eq!(u16::from(x * y), a.wrapping_mul(b));
        prop_assert_eq!(u16::from(x.wrapping_neg()), a.wrapping_neg());
    }

    #[test]
    fn u16_carry_chains_match_host(a: u16, b: u16, carry: bool) {
        let (sum, c) = U16::from(a).add_carry(U16::from(b), carry);
        let (host_sum, c1) = a.overflowing_add(b);
        let (host_sum, c2) = host_sum.overflowing_add(carry as u16);
        prop_assert_eq!((u16::from(sum), c), (host_sum, c1 | c2));

        let (diff, bo) = U16::from(a).sub_borrow(U16::from(b), carry);
        let (host_diff, b1) = a.overflowing_sub(b);
        let (host_diff, b2) = host_diff.overflowing_sub(carry as u16);
        prop_assert_eq!((u16::from(diff), bo), (host_diff, b1 | b2));
    }

    #[test]
    fn u16_extended_multiply_matches_host(a: u16, b: u16) {
        let (low, high) = U16::from(a).multiply_extended(U16::from(b));
        let wide = u32::from(a) * u32::from(b);
        prop_assert_eq!(u16::from(low), wide as u16);
        prop_assert_eq!(u16::from(high), (wide >> 16) as u16);
    }

    #[test]
    fn u16_shifts_match_host(a: u16, amount in 0u32..16) {
        prop_assert_eq!(u16::from(U16::from(a) << amount), a << amount);
        prop_assert_eq!(u16::from(U16::from(a) >> amount), a >> amount);
    }

    #[test]
    fn u16_division_matches_host(a: u16, b in 1u16..) {
        let (q, r) = U16::from(a).div_rem(U16::from(b));
        prop_assert_eq!(u16::from(q), a / b);
        prop_assert_eq!(u16::from(r), a % b);
    }

    #[test]
    fn u16_comparison_matches_host(a: u16, b: u16) {
        prop_assert_eq!(U16::from(a).cmp(&U16::from(b)), a.cmp(&b));
    }

    #[test]
    fn u16_bitwise_matches_host(a: u16, b: u16) {
        let (x, y) = (U16::from(a), U16::from(b));
        prop_assert_eq!(u16::from(x & y), a & b);
        prop_assert_eq!(u16::from(x | y), a | b);
        prop_assert_eq!(u16::from(x ^ y), a ^ b);
        prop_assert_eq!(u16::from(!x), !a);
    }

    #[test]
    fn u16_bit_scan_matches_host(a: u16) {
        let expected = if a == 0 { None } else { Some(15 - a.leading_zeros()) };
        prop_assert_eq!(U16::from(a).reverse_bit_scan(), expected);
        prop_assert_eq!(U16::from(a).leading_zeros(), a.leading_zeros());
    }

    #[test]
    fn i16_signed_arithmetic_matches_host(a: i16, b: i16) {
        let (x, y) = (I16::from(a), I16::from(b));
        prop_assert_eq!(i16::from(x + y), a.wrapping_add(b));
        prop_assert_eq!(i16::from(x - y), a.wrapping_sub(b));
        prop_assert_eq!(i16::from(x * y), a.wrapping_mul(b));
        prop_assert_eq!(i16::from(-x), a.wrapping_neg());
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn i16_arithmetic_shift_matches_host(a: i16, amount in 0u32..16) {
        prop_assert_eq!(i16::from(I16::from(a) >> amount), a >> amount);
        prop_assert_eq!(i16::from(I16::from(a) << amount), a.wrapping_shl(amount));
    }

    #[test]
    fn i16_division_matches_host(a: i16, b: i16) {
        prop_assume!(b != 0);
        let (q, r) = I16::from(a).div_rem(I16::from(b));
        prop_assert_eq!(i16::from(q), a.wrapping_div(b));
        prop_assert_eq!(i16::from(r), a.wrapping_rem(b));
    }

    #[test]
    fn i16_extended_multiply_matches_host(a: i16, b: i16) {
        let (low, high) = I16::from(a).multiply_extended(I16::from(b));
        let wide = i32::from(a) * i32::from(b);
        prop_assert_eq!(u16::from(low), wide as u16);
        prop_assert_eq!(i16::from(high), (wide >> 16) as i16);
    }

    // the 32-bit mirror exercises a different limb base case

    #[test]
    fn u32_arithmetic_matches_host(a: u32, b: u32) {
        let (x, y) = (U32::from(a), U32::from(b));
        prop_assert_eq!(u32::from(x + y), a.wrapping_add(b));
        prop_assert_eq!(u32::from(x - y), a.wrapping_sub(b));
        prop_assert_eq!(u32::from(x * y), a.wrapping_mul(b));
        let (low, high) = x.multiply_extended(y);
        let wide = u64::from(a) * u64::from(b);
        prop_assert_eq!(u32::from(low), wide as u32);
        prop_assert_eq!(u32::from(high), (wide >> 32) as u32);
    }

    // at 128 bits the recursion sits on u64 limbs and the host still has
    // a native oracle

    #[test]
    fn u128_arithmetic_matches_host(a: u128, b: u128) {
        let (x, y) = (U128::from(a), U128::from(b));
        prop_assert_eq!(u128::from(x + y), a.wrapping_add(b));
        prop_assert_eq!(u128::from(x - y), a.wrapping_sub(b));
        prop_assert_eq!(u128::from(x * y), a.wrapping_mul(b));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn u128_shifts_match_host(a: u128, amount in 0u32..128) {
        prop_assert_eq!(u128::from(U128::from(a) << amount), a << amount);
        prop_assert_eq!(u128::from(U128::from(a) >> amount), a >> amount);
    }

    #[test]
    fn u128_division_matches_host(a: u128, b in 1u128..) {
        let (q, r) = U128::from(a).div_rem(U128::from(b));
        prop_assert_eq!(u128::from(q), a / b);
        prop_assert_eq!(u128::from(r), a % b);
    }

    #[test]
    fn u128_extended_multiply_matches_school_product(a: u64, b: u64) {
        // cross-check the recursive FOIL against the host widening product
        let (low, high) = U128::from(a).multiply_extended(U128::from(b));
        let wide = u128::from(a) * u128::from(b);
        prop_assert_eq!(u128::from(low), wide);
        prop_assert_eq!(u128::from(high), 0);
    }
}

#[test]
fn extended_multiply_all_ones_seed() {
    let (low, high) = U16::from(0xFFFFu16).multiply_extended(U16::from(0xFFFFu16));
    assert_eq!(u16::from(low), 0x0001);
    assert_eq!(u16::from(high), 0xFFFE);
}
