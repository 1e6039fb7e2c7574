//! Stable identifiers for every diagnostic fsmc can report.
//!
//! Parser codes live in the 100 range, compiler codes in the 200 range.
//! The letter tells errors (`E`) from warnings (`W`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a code names an error or a warning.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Printed as `E`.
    Error,
    /// Printed as `W`.
    Warning,
}

impl Category {
    /// The letter that starts the printed code.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A diagnostic identifier such as `E103` or `W203`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Error or warning.
    pub category: Category,
    /// The number, printed with at least three digits.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
