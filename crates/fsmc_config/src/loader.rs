//! Transition-table file loading and validation.

use crate::error::ConfigError;
use crate::types::FsmConfig;
use std::path::Path;

/// Loads and validates a transition table from a file.
pub fn load_config(path: &Path) -> Result<FsmConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a transition table from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<FsmConfig, ConfigError> {
    let config: FsmConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Returns `true` for names usable as SystemVerilog identifiers.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

fn validate_width(field: &str, width: Option<u32>) -> Result<(), ConfigError> {
    match width {
        Some(w) if !(1..=64).contains(&w) => Err(ConfigError::ValidationError(format!(
            "{field} must be between 1 and 64, got {w}"
        ))),
        _ => Ok(()),
    }
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &FsmConfig) -> Result<(), ConfigError> {
    if config.fsm.name.is_empty() {
        return Err(ConfigError::MissingField("fsm.name".to_string()));
    }
    if !is_identifier(&config.fsm.name) {
        return Err(ConfigError::ValidationError(format!(
            "fsm.name `{}` is not a valid identifier",
            config.fsm.name
        )));
    }
    for (field, value) in [("fsm.clock", &config.fsm.clock), ("fsm.reset", &config.fsm.reset)] {
        if !is_identifier(value) {
            return Err(ConfigError::ValidationError(format!(
                "{field} `{value}` is not a valid identifier"
            )));
        }
    }
    if let Some(state) = &config.fsm.default_state {
        if !is_identifier(state) {
            return Err(ConfigError::ValidationError(format!(
                "fsm.default_state `{state}` is not a valid state name"
            )));
        }
    }
    if config.transitions.is_empty() {
        return Err(ConfigError::MissingField("transitions".to_string()));
    }
    for (i, row) in config.transitions.iter().enumerate() {
        for (key, value) in [("from", &row.from), ("to", &row.to), ("when", &row.when)] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(format!("transitions[{i}].{key}")));
            }
        }
        for (key, state) in [("from", &row.from), ("to", &row.to)] {
            if !is_identifier(state) {
                return Err(ConfigError::ValidationError(format!(
                    "transitions[{i}].{key} `{state}` is not a valid state name"
                )));
            }
        }
    }
    for (name, output) in &config.outputs {
        validate_width(&format!("outputs.{name}.width"), output.width)?;
    }
    for (name, input) in &config.inputs {
        validate_width(&format!("inputs.{name}.width"), input.width)?;
    }
    if config.equivalence.max_assignments == 0 {
        return Err(ConfigError::ValidationError(
            "equivalence.max_assignments must be positive".to_string(),
        ));
    }
    Ok(())
}
