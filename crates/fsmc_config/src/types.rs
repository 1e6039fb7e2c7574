//! Types deserialized from a transition-table file.

use fsmc_ir::MachineKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_name() -> String {
    "ctrl".to_string()
}

fn default_clock() -> String {
    "clk".to_string()
}

fn default_reset() -> String {
    "rst_n".to_string()
}

fn default_max_assignments() -> u64 {
    1 << 20
}

/// A complete transition-table file.
///
/// Only `[[transitions]]` is required; every other section has defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsmConfig {
    /// Machine-level settings.
    #[serde(default)]
    pub fsm: FsmSection,
    /// Per-output settings keyed by signal name.
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputConfig>,
    /// Per-input settings keyed by signal name.
    #[serde(default)]
    pub inputs: BTreeMap<String, InputConfig>,
    /// Equivalence-partitioning limits.
    #[serde(default)]
    pub equivalence: EquivalenceConfig,
    /// The ordered transition rows.
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

/// The `[fsm]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsmSection {
    /// Module name and output file stem.
    #[serde(default = "default_name")]
    pub name: String,
    /// Explicit reset state; derived from the table when absent.
    #[serde(default)]
    pub default_state: Option<String>,
    /// Clock port name.
    #[serde(default = "default_clock")]
    pub clock: String,
    /// Active-low asynchronous reset port name.
    #[serde(default = "default_reset")]
    pub reset: String,
    /// Output style of the machine.
    #[serde(default)]
    pub kind: MachineKind,
}

impl Default for FsmSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            default_state: None,
            clock: default_clock(),
            reset: default_reset(),
            kind: MachineKind::default(),
        }
    }
}

/// An `[outputs.<name>]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Value driven when no transition assigns the output.
    #[serde(default)]
    pub default: u64,
    /// Explicit width, replacing the inferred one.
    #[serde(default)]
    pub width: Option<u32>,
}

/// An `[inputs.<name>]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Explicit width, replacing the inferred one.
    #[serde(default)]
    pub width: Option<u32>,
}

/// The `[equivalence]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalenceConfig {
    /// Largest input domain enumerated before falling back to structural
    /// comparison of guards.
    #[serde(default = "default_max_assignments")]
    pub max_assignments: u64,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            max_assignments: default_max_assignments(),
        }
    }
}

/// One `[[transitions]]` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Source state.
    pub from: String,
    /// Destination state.
    pub to: String,
    /// Guard expression.
    pub when: String,
    /// Output assignment expression.
    #[serde(default)]
    pub set: Option<String>,
}
