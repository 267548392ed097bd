//! Segue - A Decorated Transition Rule
//!
//! A segue is a directed edge between two sections plus the flags the engine
//! consults when firing it. Equality and hash cover the edge alone, so a
//! rule graph can never hold two segues over the same endpoints.

use helm_graph::{DirectedEdge, DirectedGraph, Edge, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker alias for segue tags.
///
/// The embedding application picks one closed tag type per rule graph (an
/// enum, a string key, a small integer namespace); tag equality is a plain
/// value comparison, never a type-erased one.
pub trait Tag: Clone + Eq + Hash + fmt::Debug {}

impl<T> Tag for T where T: Clone + Eq + Hash + fmt::Debug {}

/// A rule graph: the set of legal transitions between sections.
pub type NavGraph<N, T = &'static str> = DirectedGraph<Segue<N, T>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segue<N: Node, T: Tag = &'static str> {
    edge: DirectedEdge<N>,
    tag: Option<T>,
    auto: bool,
    dismissable: bool,
}

impl<N: Node, T: Tag> Segue<N, T> {
    /// A plain segue from `source` to `target`: untagged, manual, not
    /// dismissable.
    pub fn new(source: N, target: N) -> Self {
        Self::from_edge(DirectedEdge::new(source, target))
    }

    pub fn from_edge(edge: DirectedEdge<N>) -> Self {
        Self {
            edge,
            tag: None,
            auto: false,
            dismissable: false,
        }
    }

    /// Name the segue for tag-directed navigation. Tags need not be unique.
    pub fn with_tag(mut self, tag: T) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the segue to fire automatically whenever its source section
    /// becomes the newest presented one.
    pub fn auto(mut self) -> Self {
        self.auto = true;
        self
    }

    /// Allow the segue to be fired in reverse, dismissing its target.
    pub fn dismissable(mut self) -> Self {
        self.dismissable = true;
        self
    }

    pub fn edge(&self) -> &DirectedEdge<N> {
        &self.edge
    }

    pub fn tag(&self) -> Option<&T> {
        self.tag.as_ref()
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn is_dismissable(&self) -> bool {
        self.dismissable
    }
}

// Decoration never affects set membership: a rule graph keyed by these
// impls rejects duplicate routes between the same two sections.
impl<N: Node, T: Tag> PartialEq for Segue<N, T> {
    fn eq(&self, other: &Self) -> bool {
        self.edge == other.edge
    }
}

impl<N: Node, T: Tag> Eq for Segue<N, T> {}

impl<N: Node, T: Tag> Hash for Segue<N, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge.hash(state);
    }
}

impl<N: Node, T: Tag> Edge for Segue<N, T> {
    type Node = N;

    fn source(&self) -> &N {
        self.edge.source()
    }

    fn target(&self) -> &N {
        self.edge.target()
    }
}

impl<N: Node, T: Tag> fmt::Display for Segue<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edge)?;
        if let Some(tag) = &self.tag {
            write!(f, " [{tag:?}]")?;
        }
        if self.auto {
            write!(f, " (auto)")?;
        }
        if self.dismissable {
            write!(f, " (dismissable)")?;
        }
        Ok(())
    }
}
