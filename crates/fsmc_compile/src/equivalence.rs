//! Equivalence partitioning of guards by exhaustive evaluation.
//!
//! Two guards are equivalent when they agree on every point of two finite
//! domains:
//!
//! - the *digit* domain, every value assignment of the signals compared
//!   against literals, bounded by each signal's width;
//! - the *rank* domain, every ranking of the signals compared against other
//!   signals (each name mapped to `0..k`, ties allowed).
//!
//! A literal comparison has no opinion in the rank domain and a symbolic one
//! has no opinion in the digit domain. `and`/`or` with one undecided side take
//! the other side; a guard that stays undecided counts as true.
//!
//! The cost is exponential in the number and width of inputs. Guard inputs
//! of control FSMs are a handful of narrow signals, and domains above the
//! configured cap fall back to structural comparison with a warning.

use crate::errors;
use fsmc_common::BitWidth;
use fsmc_diagnostics::DiagnosticSink;
use fsmc_ir::{Comparison, Condition, ConditionFold, GroupMap, Input, LogicOp, Operand, Transition};
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Which comparisons a domain can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DomainKind {
    Digits,
    Ranks,
}

/// A mixed-radix enumeration over a list of signals.
#[derive(Debug, Clone)]
struct Domain {
    kind: DomainKind,
    names: Vec<String>,
    radices: Vec<u64>,
}

impl Domain {
    /// Number of points. An empty domain contributes no points.
    fn size(&self) -> Option<u64> {
        if self.names.is_empty() {
            return Some(0);
        }
        self.radices
            .iter()
            .try_fold(1u64, |acc, &radix| acc.checked_mul(radix))
    }

    fn decode(&self, mut index: u64, values: &mut [u64]) {
        for (slot, &radix) in values.iter_mut().zip(&self.radices) {
            *slot = index % radix;
            index /= radix;
        }
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Evaluates a guard at one point of a domain.
struct Evaluator<'a> {
    domain: &'a Domain,
    values: &'a [u64],
}

impl Evaluator<'_> {
    fn value_of(&self, name: &str) -> Option<u64> {
        self.domain.slot(name).map(|i| self.values[i])
    }
}

impl ConditionFold for Evaluator<'_> {
    type Output = Option<bool>;

    fn compare(&mut self, cmp: &Comparison) -> Option<bool> {
        match (&cmp.value, self.domain.kind) {
            (Operand::Literal(rhs), DomainKind::Digits) => {
                Some(cmp.op.evaluate(self.value_of(&cmp.signal)?, *rhs))
            }
            (Operand::Signal(rhs), DomainKind::Ranks) => Some(
                cmp.op
                    .evaluate(self.value_of(&cmp.signal)?, self.value_of(rhs)?),
            ),
            _ => None,
        }
    }

    fn not(&mut self, operand: Option<bool>) -> Option<bool> {
        operand.map(|b| !b)
    }

    fn binary(&mut self, op: LogicOp, lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
        match (lhs, rhs) {
            (Some(l), Some(r)) => Some(match op {
                LogicOp::Or => l || r,
                _ => l && r,
            }),
            (Some(known), None) | (None, Some(known)) => Some(known),
            (None, None) => None,
        }
    }
}

/// The combined digit and rank domains of a set of guards.
#[derive(Debug, Clone)]
pub struct EquivalenceDomain {
    digits: Domain,
    ranks: Domain,
}

impl EquivalenceDomain {
    /// Builds the domains referenced by `guards`.
    ///
    /// Signals are taken in first-seen order. Widths come from `inputs`;
    /// a signal not listed there is treated as one bit wide.
    pub fn new<'a>(guards: impl IntoIterator<Item = &'a Condition>, inputs: &[Input]) -> Self {
        let width_of = |name: &str| {
            inputs
                .iter()
                .find(|i| i.name == name)
                .map_or(BitWidth::ONE, |i| i.width)
        };

        let mut digit_names: Vec<String> = Vec::new();
        let mut rank_names: Vec<String> = Vec::new();
        let push = |names: &mut Vec<String>, name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };
        for guard in guards {
            for cmp in guard.comparisons() {
                match &cmp.value {
                    Operand::Literal(_) => push(&mut digit_names, &cmp.signal),
                    Operand::Signal(other) => {
                        push(&mut rank_names, &cmp.signal);
                        push(&mut rank_names, other);
                    }
                }
            }
        }

        let digit_radices = digit_names
            .iter()
            .map(|n| width_of(n).cardinality())
            .collect();
        let k = rank_names.len() as u64;
        let rank_radices = vec![k; rank_names.len()];
        Self {
            digits: Domain {
                kind: DomainKind::Digits,
                names: digit_names,
                radices: digit_radices,
            },
            ranks: Domain {
                kind: DomainKind::Ranks,
                names: rank_names,
                radices: rank_radices,
            },
        }
    }

    /// Total number of points in both domains, or `None` on overflow.
    pub fn size(&self) -> Option<u64> {
        self.digits.size()?.checked_add(self.ranks.size()?)
    }

    /// Evaluates `guard` at every point: digit points first, then rank points.
    pub fn truth_vector(&self, guard: &Condition) -> Vec<bool> {
        let mut vector = evaluate_domain(&self.digits, guard);
        vector.extend(evaluate_domain(&self.ranks, guard));
        vector
    }
}

fn evaluate_domain(domain: &Domain, guard: &Condition) -> Vec<bool> {
    let size = domain
        .size()
        .and_then(|s| usize::try_from(s).ok())
        .unwrap_or(0);
    (0..size)
        .into_par_iter()
        .map_init(
            || vec![0u64; domain.names.len()],
            |values, index| {
                domain.decode(index as u64, values);
                let mut eval = Evaluator {
                    domain,
                    values: values.as_slice(),
                };
                guard.fold(&mut eval).unwrap_or(true)
            },
        )
        .collect()
}

/// Numbers keys by first appearance: equal keys share an id, ids start at 1.
fn assign_groups<K: Eq + Hash>(keys: impl IntoIterator<Item = K>) -> GroupMap {
    let mut ids: HashMap<K, u32> = HashMap::new();
    let mut groups = Vec::new();
    for key in keys {
        let next = ids.len() as u32 + 1;
        groups.push(*ids.entry(key).or_insert(next));
    }
    GroupMap::from_groups(groups)
}

/// Assigns an equivalence group to every transition.
///
/// `inputs` must include every signal guards may reference, clock and reset
/// included. When the combined domain exceeds `max_assignments`, W203 is
/// reported and guards are grouped by structural equality.
pub fn partition(
    transitions: &[Transition],
    inputs: &[Input],
    max_assignments: u64,
    sink: &DiagnosticSink,
) -> GroupMap {
    let domain = EquivalenceDomain::new(transitions.iter().map(|t| &t.guard), inputs);
    let size = domain.size();

    let groups = match size {
        Some(size) if size <= max_assignments => {
            let vectors: Vec<Vec<bool>> = transitions
                .iter()
                .map(|t| domain.truth_vector(&t.guard))
                .collect();
            assign_groups(vectors)
        }
        _ => {
            sink.emit(errors::warn_domain_too_large(size, max_assignments));
            assign_groups(transitions.iter().map(|t| &t.guard))
        }
    };

    debug!(
        domain_size = ?size,
        groups = groups.group_count(),
        transitions = transitions.len(),
        "partitioned guards"
    );
    groups
}
