//! Software emulation of fixed-width integers.
//!
//! This crate provides the integer layer of the `fpemu` workspace:
//! unsigned and signed fixed-width integers built by recursively pairing
//! two half-width limbs, together with the extended primitives the
//! floating-point layer consumes:
//!
//! - [`Word`]: the narrow interface every limb type satisfies
//!   (add-with-carry, subtract-with-borrow, extended multiply, restoring
//!   division, reverse bit scan)
//! - [`WideUint`]: an unsigned integer of twice the width of its limb type
//! - [`WideInt`]: the signed, two's-complement view of the same bits
//!
//! At each width the primitives are a compile-time choice: when the host
//! has a native integer of that width the [`Word`] implementation
//! delegates to host arithmetic, otherwise [`WideUint`] recurses into its
//! half-width limbs. `U128` is `WideUint<u64>` and `U256` is
//! `WideUint<U128>`, so the same code path scales past the widest host
//! type.
//!
//! All arithmetic is modulo `2^W`. Division by zero panics, like the host
//! integer types.
//!
//! # Examples
//!
//! ```
//! use fpemu_wideint::{Word, U16};
//!
//! let a = U16::from(0xFFFFu16);
//! let (low, high) = a.multiply_extended(a);
//! assert_eq!(u16::from(low), 0x0001);
//! assert_eq!(u16::from(high), 0xFFFE);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod int;
mod uint;
mod word;

pub use int::WideInt;
pub use uint::WideUint;
pub use word::Word;

/// Software 16-bit unsigned integer.
pub type U16 = WideUint<u8>;
/// Software 32-bit unsigned integer.
pub type U32 = WideUint<u16>;
/// Software 64-bit unsigned integer.
pub type U64 = WideUint<u32>;
/// Software 128-bit unsigned integer.
pub type U128 = WideUint<u64>;
/// Software 256-bit unsigned integer, recursing through [`U128`].
pub type U256 = WideUint<U128>;

/// Software 16-bit signed integer.
pub type I16 = WideInt<u8>;
/// Software 32-bit signed integer.
pub type I32 = WideInt<u16>;
/// Software 64-bit signed integer.
pub type I64 = WideInt<u32>;
/// Software 128-bit signed integer.
pub type I128 = WideInt<u64>;
/// Software 256-bit signed integer.
pub type I256 = WideInt<U128>;
