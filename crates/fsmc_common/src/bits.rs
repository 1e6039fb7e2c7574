//! Bit-width arithmetic and sized binary literals (`4'b0101`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The widest signal the compiler models. Values are carried as `u64`.
pub const MAX_WIDTH: u32 = 64;

/// A signal width in bits. Always at least 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct BitWidth(u32);

impl BitWidth {
    /// A single bit.
    pub const ONE: BitWidth = BitWidth(1);

    /// Creates a width, clamping into `1..=MAX_WIDTH`.
    pub fn new(bits: u32) -> Self {
        Self(bits.clamp(1, MAX_WIDTH))
    }

    /// Returns the number of bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Returns the largest value representable in this width.
    pub fn max_value(self) -> u64 {
        if self.0 >= 64 {
            u64::MAX
        } else {
            (1u64 << self.0) - 1
        }
    }

    /// Returns the number of distinct values in this width, saturating at `u64::MAX`.
    pub fn cardinality(self) -> u64 {
        if self.0 >= 64 {
            u64::MAX
        } else {
            1u64 << self.0
        }
    }

    /// Returns `true` if `value` fits without truncation.
    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the minimum width able to hold `max_value`: `ceil(log2(max_value + 1))`,
/// and never less than one bit.
pub fn width_for_value(max_value: u64) -> BitWidth {
    BitWidth::new(u64::BITS - max_value.leading_zeros())
}

/// Formats `value` as a sized binary literal of exactly `width` digits.
///
/// Values wider than `width` are truncated to their low bits.
pub fn sized_binary(value: u64, width: BitWidth) -> String {
    let masked = value & width.max_value();
    format!(
        "{bits}'b{masked:0digits$b}",
        bits = width.bits(),
        digits = width.bits() as usize
    )
}

/// Parses a sized binary literal such as `3'b101` back into `(width, value)`.
///
/// Returns `None` if the text is not a well-formed sized binary literal or the
/// digit count does not match the declared width.
pub fn parse_sized_binary(text: &str) -> Option<(BitWidth, u64)> {
    let (size, digits) = text.split_once("'b")?;
    let bits: u32 = size.parse().ok()?;
    if bits == 0 || bits > MAX_WIDTH || digits.len() != bits as usize {
        return None;
    }
    let value = u64::from_str_radix(digits, 2).ok()?;
    Some((BitWidth::new(bits), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_for_small_values() {
        assert_eq!(width_for_value(0).bits(), 1);
        assert_eq!(width_for_value(1).bits(), 1);
        assert_eq!(width_for_value(2).bits(), 2);
        assert_eq!(width_for_value(3).bits(), 2);
        assert_eq!(width_for_value(4).bits(), 3);
        assert_eq!(width_for_value(255).bits(), 8);
        assert_eq!(width_for_value(256).bits(), 9);
        assert_eq!(width_for_value(u64::MAX).bits(), 64);
    }

    #[test]
    fn sized_binary_pads_to_width() {
        assert_eq!(sized_binary(1, BitWidth::new(2)), "2'b01");
        assert_eq!(sized_binary(0, BitWidth::ONE), "1'b0");
        assert_eq!(sized_binary(5, BitWidth::new(4)), "4'b0101");
    }

    #[test]
    fn sized_binary_truncates_wide_values() {
        assert_eq!(sized_binary(6, BitWidth::new(2)), "2'b10");
    }

    #[test]
    fn sized_binary_decodes_back() {
        for bits in 1..=5u32 {
            let width = BitWidth::new(bits);
            for value in 0..width.cardinality() {
                let text = sized_binary(value, width);
                assert_eq!(parse_sized_binary(&text), Some((width, value)), "{text}");
            }
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(parse_sized_binary("2'b1"), None);
        assert_eq!(parse_sized_binary("b01"), None);
        assert_eq!(parse_sized_binary("0'b"), None);
        assert_eq!(parse_sized_binary("2'h01"), None);
    }

    #[test]
    fn width_clamps() {
        assert_eq!(BitWidth::new(0).bits(), 1);
        assert_eq!(BitWidth::new(100).bits(), 64);
        assert_eq!(BitWidth::new(64).max_value(), u64::MAX);
        assert!(BitWidth::new(2).fits(3));
        assert!(!BitWidth::new(2).fits(4));
    }

    #[test]
    fn serde_roundtrip() {
        let w = BitWidth::new(7);
        let json = serde_json::to_string(&w).unwrap();
        let back: BitWidth = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
