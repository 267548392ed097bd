//! Helm facade crate.
//!
//! This crate re-exports the graph and engine layers with a single entry
//! point. The engine stays a library surface: rule graphs are built
//! in-memory by the embedding application, never parsed from the outside.

pub use helm_core as core;
pub use helm_graph as graph;

pub use helm_core::{Helm, HelmError, NavGraph, NavPath, Segue};
pub use helm_graph::{DirectedEdge, DirectedGraph, GraphError};

pub mod prelude {
    pub use helm_core::prelude::*;
}
