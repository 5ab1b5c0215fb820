//! The exhaustive sweeps: every binary16 pair for the arithmetic and
//! comparison operations, every 16-bit pattern for the conversions, and
//! the 16-bit software integers against the host's.
//!
//! The reference for binary16 arithmetic is the host FPU at binary32:
//! widening is exact and binary32 carries more than `2p + 2` bits of
//! binary16, so `(f16)((f32)a op (f32)b)` is the correctly rounded
//! result for all four operations.

use std::sync::atomic::{AtomicU64, Ordering};

use fpemu_core::{Float16, Float32, Float64};
use fpemu_wideint::{I16, U16, Word};
use num_traits::ops::wrapping::WrappingNeg;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::report::{Mismatch, SweepSummary};

/// One sweepable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Cmp,
    Convert,
    IntToFloat,
    FloatToInt,
    Wideint,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Cmp,
        Operation::Convert,
        Operation::IntToFloat,
        Operation::FloatToInt,
        Operation::Wideint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add16",
            Operation::Sub => "sub16",
            Operation::Mul => "mul16",
            Operation::Div => "div16",
            Operation::Cmp => "cmp16",
            Operation::Convert => "convert16",
            Operation::IntToFloat => "int_to_fp",
            Operation::FloatToInt => "fp_to_int",
            Operation::Wideint => "wideint16",
        }
    }
}

/// Runs one sweep to completion and returns its summary.
pub fn run(operation: Operation, keep: usize) -> SweepSummary {
    info!(operation = operation.name(), "sweep started");
    let summary = match operation {
        Operation::Add | Operation::Sub | Operation::Mul | Operation::Div => {
            sweep_arithmetic(operation, keep)
        }
        Operation::Cmp => sweep_comparisons(keep),
        Operation::Convert => sweep_conversions(keep),
        Operation::IntToFloat => sweep_int_to_float(keep),
        Operation::FloatToInt => sweep_float_to_int(keep),
        Operation::Wideint => sweep_wideint(keep),
    };
    info!(
        operation = operation.name(),
        pairs = summary.pairs,
        mismatches = summary.mismatches,
        "sweep finished"
    );
    summary
}

fn exponent_band(bits: u16) -> u32 {
    u32::from((bits >> 10) & 0x1F)
}

/// Folds the per-left partial summaries, logging progress as lefts
/// complete.
fn parallel_over_lefts<FnMap>(name: &str, keep: usize, per_left: FnMap) -> SweepSummary
where
    FnMap: Fn(u16, &mut SweepSummary) + Sync,
{
    let progress = AtomicU64::new(0);

    let partials: Vec<SweepSummary> = (0..=u16::MAX)
        .into_par_iter()
        .map(|left| {
            let mut local = SweepSummary::new(name);
            per_left(left, &mut local);

            let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
            if done % 4096 == 0 {
                debug!(lefts = done, total = 65536u32, "progress");
            }
            local
        })
        .collect();

    let mut total = SweepSummary::new(name);
    for partial in partials {
        total.absorb(partial, keep);
    }
    total
}

fn arithmetic_mismatch(
    operation: Operation,
    a_bits: u16,
    b_bits: u16,
) -> Result<(), (Float16, Float16)> {
    let a = Float16::from_bits(a_bits);
    let b = Float16::from_bits(b_bits);
    let (fa, fb) = (a.to_f32(), b.to_f32());

    let (software, hardware) = match operation {
        Operation::Add => (a + b, fa + fb),
        Operation::Sub => (a - b, fa - fb),
        Operation::Mul => (a * b, fa * fb),
        Operation::Div => (a / b, fa / fb),
        _ => unreachable!("not an arithmetic sweep"),
    };

    let reference = Float16::from_f32(hardware);
    let matches = if reference.is_nan() {
        // payload choice differs per platform; agreement is on the class
        software.is_nan()
    } else {
        software.to_bits() == reference.to_bits()
    };

    if matches {
        Ok(())
    } else {
        Err((software, reference))
    }
}

fn sweep_arithmetic(operation: Operation, keep: usize) -> SweepSummary {
    parallel_over_lefts(operation.name(), keep, |a_bits, local| {
        let band = exponent_band(a_bits);
        let mut mismatches = 0u64;
        for b_bits in 0..=u16::MAX {
            if let Err((software, reference)) = arithmetic_mismatch(operation, a_bits, b_bits) {
                mismatches += 1;
                local.record(
                    band,
                    Some(Mismatch {
                        left: Float16::from_bits(a_bits).to_triplet_string(),
                        right: Float16::from_bits(b_bits).to_triplet_string(),
                        software: software.to_hex_string(),
                        hardware: reference.to_hex_string(),
                    }),
                    keep,
                );
            }
        }
        local.record_pairs(band, 65536 - mismatches);
    })
}

fn sweep_comparisons(keep: usize) -> SweepSummary {
    parallel_over_lefts("cmp16", keep, |a_bits, local| {
        let band = exponent_band(a_bits);
        let a = Float16::from_bits(a_bits);
        let fa = a.to_f32();
        let mut mismatches = 0u64;

        for b_bits in 0..=u16::MAX {
            let b = Float16::from_bits(b_bits);
            let fb = b.to_f32();

            let software = [a == b, a != b, a < b, a <= b, a > b, a >= b];
            let hardware = [fa == fb, fa != fb, fa < fb, fa <= fb, fa > fb, fa >= fb];

            if software != hardware {
                mismatches += 1;
                local.record(
                    band,
                    Some(Mismatch {
                        left: a.to_hex_string(),
                        right: b.to_hex_string(),
                        software: format!("{software:?}"),
                        hardware: format!("{hardware:?}"),
                    }),
                    keep,
                );
            }
        }
        local.record_pairs(band, 65536 - mismatches);
    })
}

fn sweep_conversions(keep: usize) -> SweepSummary {
    parallel_over_lefts("convert16", keep, |bits, local| {
        let band = exponent_band(bits);
        let original = Float16::from_bits(bits);

        let via32: Float16 = Float32::from(original).convert();
        let via64: Float16 = Float64::from(original).convert();
        let host = Float16::from_f32(original.to_f32());

        let exact = via32.to_bits() == bits && via64.to_bits() == bits;
        let host_ok = if original.is_nan() {
            host.is_nan()
        } else {
            host.to_bits() == bits
        };

        if exact && host_ok {
            local.record_pairs(band, 1);
        } else {
            local.record(
                band,
                Some(Mismatch {
                    left: original.to_hex_string(),
                    right: String::new(),
                    software: format!(
                        "via32 {} via64 {}",
                        via32.to_hex_string(),
                        via64.to_hex_string()
                    ),
                    hardware: host.to_hex_string(),
                }),
                keep,
            );
        }
    })
}

fn sweep_int_to_float(keep: usize) -> SweepSummary {
    parallel_over_lefts("int_to_fp", keep, |value, local| {
        let band = u32::from(value >> 12);
        let signed = value as i16;

        let checks = [
            (
                "u16->f32",
                Float32::from(value).to_bits(),
                f32::from(value).to_bits(),
            ),
            (
                "i16->f32",
                Float32::from(signed).to_bits(),
                f32::from(signed).to_bits(),
            ),
            (
                "u16->f16",
                u32::from(Float16::from(value).to_bits()),
                u32::from(Float16::from_f32(f32::from(value)).to_bits()),
            ),
            (
                "i16->f16",
                u32::from(Float16::from(signed).to_bits()),
                u32::from(Float16::from_f32(f32::from(signed)).to_bits()),
            ),
        ];
        let wide_checks = [
            (
                "u16->f64",
                Float64::from(value).to_bits(),
                f64::from(value).to_bits(),
            ),
            (
                "i16->f64",
                Float64::from(signed).to_bits(),
                f64::from(signed).to_bits(),
            ),
        ];

        let mut bad = Vec::new();
        for (label, software, hardware) in checks {
            if u64::from(software) != u64::from(hardware) {
                bad.push((label, u64::from(software), u64::from(hardware)));
            }
        }
        for (label, software, hardware) in wide_checks {
            if software != hardware {
                bad.push((label, software, hardware));
            }
        }

        if bad.is_empty() {
            local.record_pairs(band, 1);
        } else {
            let (label, software, hardware) = bad[0];
            local.record(
                band,
                Some(Mismatch {
                    left: format!("{value:#06x}"),
                    right: label.to_string(),
                    software: format!("{software:#x}"),
                    hardware: format!("{hardware:#x}"),
                }),
                keep,
            );
        }
    })
}

fn sweep_float_to_int(keep: usize) -> SweepSummary {
    parallel_over_lefts("fp_to_int", keep, |bits, local| {
        let band = exponent_band(bits);
        let value = Float16::from_bits(bits);
        let reference = value.to_f32();

        // the host cast saturates where the engine applies its sentinel,
        // so only the in-range space is comparable
        if !reference.is_finite() {
            local.record_pairs(band, 1);
            return;
        }

        let mut bad = None;
        if value.to_i32() != reference as i32 {
            bad = Some(("i32", i64::from(value.to_i32()), i64::from(reference as i32)));
        } else if value.to_i64() != reference as i64 {
            bad = Some(("i64", value.to_i64(), reference as i64));
        } else if reference >= 0.0 && value.to_u32() != reference as u32 {
            bad = Some(("u32", i64::from(value.to_u32()), i64::from(reference as u32)));
        } else if (-32768.0..=32767.0).contains(&reference) && value.to_i16() != reference as i16 {
            bad = Some(("i16", i64::from(value.to_i16()), i64::from(reference as i16)));
        }

        match bad {
            None => local.record_pairs(band, 1),
            Some((label, software, hardware)) => local.record(
                band,
                Some(Mismatch {
                    left: value.to_triplet_string(),
                    right: label.to_string(),
                    software: format!("{software}"),
                    hardware: format!("{hardware}"),
                }),
                keep,
            ),
        }
    })
}

fn sweep_wideint(keep: usize) -> SweepSummary {
    parallel_over_lefts("wideint16", keep, |a_bits, local| {
        let band = u32::from(a_bits >> 12);
        let a = U16::from(a_bits);
        let sa = I16::from(a_bits as i16);
        let mut mismatches = 0u64;

        // negation and bit scan once per left operand
        if u16::from(a.wrapping_neg()) != a_bits.wrapping_neg()
            || i16::from(-sa) != (a_bits as i16).wrapping_neg()
            || a.reverse_bit_scan()
                != (a_bits != 0).then(|| 15 - a_bits.leading_zeros())
        {
            mismatches += 1;
            local.record(
                band,
                Some(Mismatch {
                    left: format!("{a_bits:#06x}"),
                    right: "unary".to_string(),
                    software: "wideint16".to_string(),
                    hardware: "host u16/i16".to_string(),
                }),
                keep,
            );
        }

        for b_bits in 0..=u16::MAX {
            let b = U16::from(b_bits);
            let sb = I16::from(b_bits as i16);
            let shift = u32::from(b_bits) & 15;

            let mut ok = u16::from(a + b) == a_bits.wrapping_add(b_bits)
                && u16::from(a - b) == a_bits.wrapping_sub(b_bits)
                && u16::from(a * b) == a_bits.wrapping_mul(b_bits)
                && u16::from(a << shift) == a_bits << shift
                && u16::from(a >> shift) == a_bits >> shift
                && i16::from(sa >> shift) == (a_bits as i16) >> shift
                && (a < b) == (a_bits < b_bits)
                && (sa < sb) == ((a_bits as i16) < (b_bits as i16));

            if ok {
                let (low, high) = a.multiply_extended(b);
                let wide = u32::from(a_bits) * u32::from(b_bits);
                ok = u16::from(low) == wide as u16 && u16::from(high) == (wide >> 16) as u16;
            }

            if ok && b_bits != 0 {
                let (q, r) = a.div_rem(b);
                ok = u16::from(q) == a_bits / b_bits && u16::from(r) == a_bits % b_bits;
                let (sq, sr) = sa.div_rem(sb);
                ok = ok
                    && i16::from(sq) == (a_bits as i16).wrapping_div(b_bits as i16)
                    && i16::from(sr) == (a_bits as i16).wrapping_rem(b_bits as i16);
            }

            if !ok {
                mismatches += 1;
                local.record(
                    band,
                    Some(Mismatch {
                        left: format!("{a_bits:#06x}"),
                        right: format!("{b_bits:#06x}"),
                        software: "wideint16".to_string(),
                        hardware: "host u16/i16".to_string(),
                    }),
                    keep,
                );
            }
        }
        // one unary check plus the 65536 pair checks
        local.record_pairs(band, 65537 - mismatches);
    })
}
