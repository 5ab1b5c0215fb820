//! Diagnostic string renderings.
//!
//! These allocate and sit off the hot path; sweep harnesses call them
//! only when reporting a mismatch.

use crate::float::Float;
use crate::format::Format;

impl<F: Format> Float<F> {
    /// The raw bits as `"0x..."` lowercase hex, unpadded.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{:x}", self.bits)
    }

    /// The decomposed value as `"{<sign>, <exponent>, 0x<significand>}"`.
    ///
    /// The exponent is unbiased for normals, pinned to emin for
    /// subnormals, and the raw field value for the special classes.
    #[must_use]
    pub fn to_triplet_string(&self) -> String {
        let c = self.decompose();
        format!(
            "{{{}, {}, 0x{:x}}}",
            if c.sign { '-' } else { '+' },
            c.exponent,
            c.significand
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Float16, Float32};

    #[test]
    fn hex_rendering() {
        assert_eq!(Float32::from_bits(0x3F80_0000).to_hex_string(), "0x3f800000");
        assert_eq!(Float16::from_bits(0x0001).to_hex_string(), "0x1");
        assert_eq!(Float32::zero(true).to_hex_string(), "0x80000000");
    }

    #[test]
    fn triplet_rendering() {
        // 1.0: exponent 0, significand with the implicit bit
        assert_eq!(
            Float32::from_bits(0x3F80_0000).to_triplet_string(),
            "{+, 0, 0x800000}"
        );
        // -2.5: exponent 1, significand 1.25
        assert_eq!(
            Float32::from_f32(-2.5).to_triplet_string(),
            "{-, 1, 0xa00000}"
        );
        // subnormals report emin
        assert_eq!(
            Float16::from_bits(0x0001).to_triplet_string(),
            "{+, -14, 0x1}"
        );
        // specials keep the raw field value
        assert_eq!(
            Float16::infinity(false).to_triplet_string(),
            "{+, 31, 0x0}"
        );
    }

    #[test]
    fn debug_names_the_format() {
        assert_eq!(
            format!("{:?}", Float32::from_bits(0x3F80_0000)),
            "binary32(0x3f800000)"
        );
    }
}
