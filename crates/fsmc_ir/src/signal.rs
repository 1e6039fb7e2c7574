//! Input and output signal declarations.
//!
//! Signals are created by interface inference and never change afterwards.
//! The name is the identity key within each of the input and output sets.

use fsmc_common::BitWidth;
use serde::{Deserialize, Serialize};

/// An input port sampled by transition guards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    /// The port name.
    pub name: String,
    /// The port width in bits.
    pub width: BitWidth,
}

impl Input {
    /// Creates a new input.
    pub fn new(name: impl Into<String>, width: BitWidth) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// Creates a single-bit input, as used for clock and reset.
    pub fn bit(name: impl Into<String>) -> Self {
        Self::new(name, BitWidth::ONE)
    }
}

/// An output register driven by the output logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// The port name.
    pub name: String,
    /// The port width in bits.
    pub width: BitWidth,
    /// The value driven when the taken transition does not assign this output.
    pub default: u64,
}

impl Output {
    /// Creates a new output.
    pub fn new(name: impl Into<String>, width: BitWidth, default: u64) -> Self {
        Self {
            name: name.into(),
            width,
            default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_input() {
        let clk = Input::bit("clk");
        assert_eq!(clk.name, "clk");
        assert_eq!(clk.width, BitWidth::ONE);
    }

    #[test]
    fn output_construction() {
        let count = Output::new("count", BitWidth::new(2), 0);
        assert_eq!(count.width.bits(), 2);
        assert_eq!(count.default, 0);
    }
}
