//! Graph Error Taxonomy
//!
//! Raised by the uniqueness-resolving queries; each variant carries enough
//! payload to render a diagnostic without going back to the graph.

use crate::edge::Edge;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<E: Edge> {
    /// More than one edge leaves the node; the full conflict set is attached.
    #[error("ambiguous egress edges from {from:?}: {edges:?}")]
    AmbiguousEgressEdges { edges: Vec<E>, from: E::Node },

    /// No edge leaves the node.
    #[error("no egress edges from {from:?}")]
    MissingEgressEdges { from: E::Node },

    /// More than one edge enters the node; the full conflict set is attached.
    #[error("ambiguous ingress edges into {to:?}: {edges:?}")]
    AmbiguousIngressEdges { edges: Vec<E>, to: E::Node },

    /// No edge enters the node.
    #[error("no ingress edges into {to:?}")]
    MissingIngressEdges { to: E::Node },
}
