//! NavPath - The Ordered Record of Fired Segues
//!
//! The path must behave as an ordered sequence (for "latest presented"
//! tie-breaks) while still answering graph-style membership queries, so it
//! is an explicit struct: the edge sequence plus a derived index of
//! presented sections, recomputed on every mutation.

use helm_graph::{DirectedEdge, Edge, Node};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The transitions taken so far, oldest first.
///
/// A section is presented while any path edge references it. The presented
/// index is kept in presentation-recency order: a section that is reached
/// again moves to the back, so reverse iteration always starts with the
/// most recently presented section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<DirectedEdge<N>>",
    into = "Vec<DirectedEdge<N>>",
    bound(serialize = "N: Serialize", deserialize = "N: serde::de::DeserializeOwned")
)]
pub struct NavPath<N: Node> {
    edges: Vec<DirectedEdge<N>>,
    presented: IndexSet<N>,
}

impl<N: Node> NavPath<N> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            presented: IndexSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edge sequence, oldest first.
    pub fn edges(&self) -> &[DirectedEdge<N>] {
        &self.edges
    }

    /// Presented sections, least recently presented first.
    pub fn sections(&self) -> impl DoubleEndedIterator<Item = &N> {
        self.presented.iter()
    }

    pub fn is_presented(&self, section: &N) -> bool {
        self.presented.contains(section)
    }

    /// The most recently presented section: the target of the last edge.
    pub fn last_section(&self) -> Option<&N> {
        self.edges.last().map(Edge::target)
    }

    pub fn contains_edge(&self, edge: &DirectedEdge<N>) -> bool {
        self.edges.contains(edge)
    }

    /// Append an edge to the tail.
    pub fn push(&mut self, edge: DirectedEdge<N>) {
        self.edges.push(edge);
        self.rebuild();
    }

    /// Remove and return the tail edge.
    pub fn pop(&mut self) -> Option<DirectedEdge<N>> {
        let edge = self.edges.pop();
        if edge.is_some() {
            self.rebuild();
        }
        edge
    }

    /// Remove the last occurrence of `edge`, scanning tail-first.
    /// Returns `false` (and changes nothing) if the edge is not in the path.
    pub fn remove_last_occurrence(&mut self, edge: &DirectedEdge<N>) -> bool {
        match self.edges.iter().rposition(|e| e == edge) {
            Some(index) => {
                self.edges.remove(index);
                self.rebuild();
                true
            }
            None => false,
        }
    }

    fn rebuild(&mut self) {
        self.presented = presented_from(&self.edges);
    }
}

/// Endpoints in traversal order, deduplicated keeping the *last* occurrence,
/// so iteration order is presentation recency.
fn presented_from<N: Node>(edges: &[DirectedEdge<N>]) -> IndexSet<N> {
    let mut presented = IndexSet::new();
    for edge in edges {
        for node in [edge.source(), edge.target()] {
            presented.shift_remove(node);
            presented.insert(node.clone());
        }
    }
    presented
}

impl<N: Node> Default for NavPath<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> From<Vec<DirectedEdge<N>>> for NavPath<N> {
    fn from(edges: Vec<DirectedEdge<N>>) -> Self {
        let presented = presented_from(&edges);
        Self { edges, presented }
    }
}

impl<N: Node> From<NavPath<N>> for Vec<DirectedEdge<N>> {
    fn from(path: NavPath<N>) -> Self {
        path.edges
    }
}

impl<N: Node> FromIterator<DirectedEdge<N>> for NavPath<N> {
    fn from_iter<I: IntoIterator<Item = DirectedEdge<N>>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}
