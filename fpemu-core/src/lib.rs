//! Software emulation of IEEE-754 binary floating-point arithmetic.
//!
//! This crate is the floating-point layer of the `fpemu` workspace. It
//! implements binary16, binary32, and binary64 (with binary128 carried
//! structurally on the software wide integers) as plain packed words,
//! and reproduces hardware behavior bit for bit:
//!
//! - add, subtract, multiply, divide, negate
//! - IEEE comparison semantics, signed zeros included
//! - widening and narrowing between formats, preserving NaN payloads
//! - conversions to and from the host integer and float types
//! - round-to-nearest-ties-to-even everywhere rounding applies
//!
//! NaN propagation returns the first NaN operand unchanged; invalid
//! operations (`Inf - Inf`, `0 x Inf`, `0 / 0`, `Inf / Inf`) produce the
//! canonical indeterminate NaN. Out-of-range float-to-integer
//! conversions follow x86 under the default `emulate-intel` feature and
//! saturate without it.
//!
//! Every operation is a pure function of value types: no allocation, no
//! shared state, freely usable across threads.
//!
//! # Examples
//!
//! ```
//! use fpemu_core::{Float16, Float32};
//!
//! // bit-exact arithmetic at binary32
//! let a = Float32::from_f32(3.0e38);
//! assert!((a + a).is_infinite());
//!
//! // binary16 division, correctly rounded
//! let third = Float16::from(1u8) / Float16::from(3u8);
//! assert_eq!(third.to_bits(), 0x3555);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod float;
pub mod format;

pub use error::TripletError;
pub use float::{Float, FpClass};
pub use format::{Binary128, Binary16, Binary32, Binary64, Format};

/// Software IEEE-754 binary16 value.
pub type Float16 = Float<Binary16>;
/// Software IEEE-754 binary32 value.
pub type Float32 = Float<Binary32>;
/// Software IEEE-754 binary64 value.
pub type Float64 = Float<Binary64>;
/// Software IEEE-754 binary128 value, backed by the software `U128`.
pub type Float128 = Float<Binary128>;
