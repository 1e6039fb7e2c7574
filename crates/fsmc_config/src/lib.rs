//! Parsing and validation of transition-table files.
//!
//! A table file is TOML: an optional `[fsm]` section naming the module,
//! clock, reset and default state, optional `[outputs.*]`/`[inputs.*]`
//! entries for defaults and width overrides, and the ordered
//! `[[transitions]]` rows. [`load_config`] produces a validated
//! [`FsmConfig`]; the guard and assignment strings are parsed later by the
//! compiler so their errors can carry snippets.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{is_identifier, load_config, load_config_from_str};
pub use types::*;
