//! Text generation from a compiled [`Fsm`](fsmc_ir::Fsm).
//!
//! [`generate_rtl`] produces the SystemVerilog module and [`build_diagram`]
//! the abstract state diagram, which [`Diagram::to_dot`] serialises as
//! Graphviz DOT. Both walk guards through the shared [`render`] traversal
//! with their own [`RenderStyle`].

#![warn(missing_docs)]

pub mod diagram;
pub mod label;
pub mod render;
pub mod rtl;

pub use diagram::{build_diagram, Diagram, Edge, Node, NodeShape};
pub use label::{edge_label, guard_label, legend, LabelStyle};
pub use render::{ConditionRenderer, RenderStyle, Rendered};
pub use rtl::{generate_rtl, RtlStyle};
