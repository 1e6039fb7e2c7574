//! The abstract state diagram and its Graphviz DOT serialisation.

use crate::label;
use fsmc_common::FsmcResult;
use fsmc_ir::Fsm;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// A state.
    Ellipse,
    /// The synthetic entry point.
    Point,
    /// The legend.
    Box,
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier.
    pub name: String,
    /// Displayed text, when different from the name.
    pub label: Option<String>,
    /// Drawing shape.
    pub shape: NodeShape,
}

/// A directed, labelled diagram edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node name.
    pub source: String,
    /// Destination node name.
    pub dest: String,
    /// Edge text.
    pub label: String,
}

/// A renderer-independent state diagram.
///
/// Contains one node per state, an unnamed entry point with an edge into
/// the reset state labelled with the negated reset signal, one edge per
/// transition, and a legend node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    /// Graph name.
    pub name: String,
    /// Nodes in drawing order.
    pub nodes: Vec<Node>,
    /// Edges in drawing order.
    pub edges: Vec<Edge>,
}

/// Identifier of the legend node.
pub const LEGEND_NODE: &str = "legend";

/// Builds the diagram of `fsm`.
pub fn build_diagram(fsm: &Fsm) -> FsmcResult<Diagram> {
    let mut nodes = vec![Node {
        name: String::new(),
        label: None,
        shape: NodeShape::Point,
    }];
    nodes.extend(fsm.all_states().map(|s| Node {
        name: s.name.clone(),
        label: None,
        shape: NodeShape::Ellipse,
    }));

    let mut edges = vec![Edge {
        source: String::new(),
        dest: fsm.default_state.name.clone(),
        label: format!("!{}", fsm.reset.name),
    }];
    for t in &fsm.transitions {
        edges.push(Edge {
            source: t.source.clone(),
            dest: t.dest.clone(),
            label: label::edge_label(fsm, t)?,
        });
    }

    nodes.push(Node {
        name: LEGEND_NODE.to_string(),
        label: Some(label::legend(fsm)?),
        shape: NodeShape::Box,
    });

    debug!(nodes = nodes.len(), edges = edges.len(), "built diagram");
    Ok(Diagram {
        name: "FSM".to_string(),
        nodes,
        edges,
    })
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Diagram {
    /// Returns the legend text, if the diagram has a legend.
    pub fn legend(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| n.shape == NodeShape::Box)
            .and_then(|n| n.label.as_deref())
    }

    /// Serialises the diagram as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let mut out = format!("digraph {} {{\n", self.name);
        for node in &self.nodes {
            let mut attrs = Vec::new();
            match node.shape {
                NodeShape::Ellipse => {}
                NodeShape::Point => attrs.push("shape=point".to_string()),
                NodeShape::Box => attrs.push("shape=box".to_string()),
            }
            if let Some(label) = &node.label {
                attrs.push(format!("label={}", quote(label)));
            }
            if attrs.is_empty() {
                out.push_str(&format!("    {}\n", quote(&node.name)));
            } else {
                out.push_str(&format!("    {} [{}]\n", quote(&node.name), attrs.join(" ")));
            }
        }
        for edge in &self.edges {
            out.push_str(&format!(
                "    {} -> {} [label={}]\n",
                quote(&edge.source),
                quote(&edge.dest),
                quote(&edge.label)
            ));
        }
        out.push_str("}\n");
        out
    }
}
