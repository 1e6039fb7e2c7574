//! Shared foundational types used across the fsmc state-machine compiler.
//!
//! This crate provides bit-width arithmetic, sized binary literal formatting,
//! and the common internal result type.

#![warn(missing_docs)]

pub mod bits;
pub mod result;

pub use bits::{parse_sized_binary, sized_binary, width_for_value, BitWidth, MAX_WIDTH};
pub use result::{FsmcResult, InternalError};
