//! Error types for the fallible construction surface.

use thiserror::Error;

/// Rejected raw field passed to
/// [`Float::try_from_triplet`](crate::Float::try_from_triplet).
///
/// The arithmetic itself never produces these: out-of-range results are
/// in-band values (infinities, zeros, NaNs). Only construction from
/// untrusted raw fields can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TripletError {
    /// The biased exponent does not fit the format's exponent field.
    #[error("biased exponent {value} does not fit {field_bits} exponent bits")]
    ExponentOutOfRange {
        /// The rejected field value.
        value: i32,
        /// Width of the format's exponent field.
        field_bits: u32,
    },
    /// The trailing significand does not fit the format's field.
    #[error("significand {value:#x} does not fit {field_bits} significand bits")]
    SignificandOutOfRange {
        /// The rejected field value, widened for display.
        value: u128,
        /// Width of the format's trailing significand field.
        field_bits: u32,
    },
}
