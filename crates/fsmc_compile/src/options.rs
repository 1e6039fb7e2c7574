//! Settings that steer compilation beyond the transition rows themselves.

use fsmc_common::BitWidth;
use fsmc_config::FsmConfig;
use fsmc_ir::MachineKind;
use std::collections::BTreeMap;

/// Compilation settings.
///
/// [`Default`] gives a Mealy machine named `ctrl` clocked by `clk` with
/// active-low reset `rst_n`, no overrides, and a domain cap of 2^20.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Module name.
    pub name: String,
    /// Explicit reset state.
    pub default_state: Option<String>,
    /// Clock port name.
    pub clock: String,
    /// Reset port name.
    pub reset: String,
    /// Machine kind; only Mealy compiles.
    pub kind: MachineKind,
    /// Output default values by name.
    pub output_defaults: BTreeMap<String, u64>,
    /// Explicit output widths by name.
    pub output_widths: BTreeMap<String, BitWidth>,
    /// Explicit input widths by name.
    pub input_widths: BTreeMap<String, BitWidth>,
    /// Largest domain the equivalence partitioner enumerates.
    pub max_assignments: u64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            name: "ctrl".to_string(),
            default_state: None,
            clock: "clk".to_string(),
            reset: "rst_n".to_string(),
            kind: MachineKind::Mealy,
            output_defaults: BTreeMap::new(),
            output_widths: BTreeMap::new(),
            input_widths: BTreeMap::new(),
            max_assignments: 1 << 20,
        }
    }
}

impl CompileOptions {
    /// Extracts compilation settings from a loaded table file.
    pub fn from_config(config: &FsmConfig) -> Self {
        Self {
            name: config.fsm.name.clone(),
            default_state: config.fsm.default_state.clone(),
            clock: config.fsm.clock.clone(),
            reset: config.fsm.reset.clone(),
            kind: config.fsm.kind,
            output_defaults: config
                .outputs
                .iter()
                .map(|(name, out)| (name.clone(), out.default))
                .collect(),
            output_widths: config
                .outputs
                .iter()
                .filter_map(|(name, out)| Some((name.clone(), BitWidth::new(out.width?))))
                .collect(),
            input_widths: config
                .inputs
                .iter()
                .filter_map(|(name, input)| Some((name.clone(), BitWidth::new(input.width?))))
                .collect(),
            max_assignments: config.equivalence.max_assignments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_config::load_config_from_str;

    #[test]
    fn defaults() {
        let opts = CompileOptions::default();
        assert_eq!(opts.name, "ctrl");
        assert_eq!(opts.clock, "clk");
        assert_eq!(opts.reset, "rst_n");
        assert_eq!(opts.max_assignments, 1 << 20);
    }

    #[test]
    fn from_config() {
        let config = load_config_from_str(
            r#"
[fsm]
name = "cntr"
default_state = "IDLE"

[outputs.count]
default = 1
width = 3

[outputs.done]

[inputs.mode]
width = 4

[[transitions]]
from = "IDLE"
to = "S1"
when = "mode = 1"
set = "count = 2 and done = 1"
"#,
        )
        .unwrap();
        let opts = CompileOptions::from_config(&config);
        assert_eq!(opts.name, "cntr");
        assert_eq!(opts.default_state.as_deref(), Some("IDLE"));
        assert_eq!(opts.output_defaults["count"], 1);
        assert_eq!(opts.output_defaults["done"], 0);
        assert_eq!(opts.output_widths.get("count"), Some(&BitWidth::new(3)));
        assert!(!opts.output_widths.contains_key("done"));
        assert_eq!(opts.input_widths.get("mode"), Some(&BitWidth::new(4)));
    }
}
