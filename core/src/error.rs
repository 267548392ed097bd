//! Navigation Error Taxonomy
//!
//! Construction-time variants abort engine construction. Per-call variants
//! are appended to the engine's error log instead of surfacing to the
//! caller: "no legal route right now" is an expected runtime condition.

use crate::segue::{Segue, Tag};
use helm_graph::{DirectedEdge, GraphError, Node};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelmError<N: Node, T: Tag = &'static str> {
    /// The rule graph holds no segues at all.
    #[error("navigation graph is empty")]
    EmptyNav,

    /// The rule graph has no inlet segue, so navigation could never start.
    #[error("navigation graph has no inlet segues")]
    NoNavInlets,

    /// The sub-graph of auto segues loops; an auto chain would never settle.
    #[error("auto segues form a cycle: {0:?}")]
    AutoCycleDetected(Vec<Segue<N, T>>),

    /// No segue carrying the tag is reachable for this operation.
    #[error("no segue tagged {0:?} is reachable")]
    MissingTaggedSegue(T),

    /// `forward` from an empty path needs exactly one inlet segue.
    #[error("forward needs exactly one inlet segue, found {0:?}")]
    AmbiguousForwardInlets(Vec<Segue<N, T>>),

    /// No dismissable segue is live in the current path.
    #[error("no dismissable segue is live in the current path")]
    NoDismissableSegue,

    /// The rule graph has no dismissable ingress segue for the section.
    #[error("section {0:?} has no dismissable ingress segue")]
    SectionMissingDismissableSegue(N),

    /// The no-argument dismiss has nothing to pop.
    #[error("cannot dismiss: the path is empty")]
    CantDismissEmptyPath,

    /// The fired segue is not part of the rule graph.
    #[error("segue {0} is not part of the navigation graph")]
    MissingSegue(DirectedEdge<N>),

    /// The firing requires a section that is not currently presented.
    #[error("section {0:?} is not presented")]
    SectionNotPresented(N),

    /// A graph-level uniqueness query failed underneath a navigation call.
    #[error(transparent)]
    Graph(#[from] GraphError<Segue<N, T>>),
}
