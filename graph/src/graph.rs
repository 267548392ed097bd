//! DirectedGraph - A Set of Edges with Derived Queries
//!
//! The graph stores nothing besides its edges; nodes, degrees, inlets and
//! outlets are all answered by looking at the edge set. Iteration follows
//! insertion order, but every *derived* sequence (egress/ingress lookups,
//! inlets, outlets, traversals) is ordered by node identity instead, so
//! identical edge sets answer identically no matter how they were built.

use crate::edge::Edge;
use crate::error::GraphError;
use ahash::AHashSet;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedGraph<E: Edge> {
    edges: IndexSet<E>,
}

impl<E: Edge> DirectedGraph<E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            edges: IndexSet::new(),
        }
    }

    /// Insert an edge. Returns `false` if the edge was already present.
    pub fn insert(&mut self, edge: E) -> bool {
        self.edges.insert(edge)
    }

    /// Remove an edge, preserving the order of the remaining ones.
    pub fn remove(&mut self, edge: &E) -> bool {
        self.edges.shift_remove(edge)
    }

    /// The stored value equal to `edge`.
    ///
    /// Useful when edge equality is coarser than the stored type (decorated
    /// edges compare by endpoints only) and the caller needs the decoration.
    pub fn get(&self, edge: &E) -> Option<&E> {
        self.edges.get(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.edges.iter()
    }

    /// Exact set membership.
    pub fn has_edge(&self, edge: &E) -> bool {
        self.edges.contains(edge)
    }

    /// True iff the node appears as an endpoint of any edge.
    pub fn has_node(&self, node: &E::Node) -> bool {
        self.edges
            .iter()
            .any(|e| e.source() == node || e.target() == node)
    }

    /// All distinct endpoints, in first-seen order.
    pub fn nodes(&self) -> IndexSet<E::Node> {
        let mut nodes = IndexSet::new();
        for edge in &self.edges {
            nodes.insert(edge.source().clone());
            nodes.insert(edge.target().clone());
        }
        nodes
    }

    /// Edges leaving `node`, in ascending order of their target.
    pub fn egress_edges(&self, node: &E::Node) -> Vec<E> {
        let mut edges: Vec<E> = self
            .edges
            .iter()
            .filter(|e| e.source() == node)
            .cloned()
            .collect();
        edges.sort_by(|a, b| (a.target(), a.source()).cmp(&(b.target(), b.source())));
        edges
    }

    /// Union of `egress_edges` over the given nodes, preserving the input
    /// node order; an edge reachable from several of them is kept at its
    /// first position only.
    pub fn egress_edges_from_all<'a, I>(&self, nodes: I) -> Vec<E>
    where
        E::Node: 'a,
        I: IntoIterator<Item = &'a E::Node>,
    {
        let mut union: IndexSet<E> = IndexSet::new();
        for node in nodes {
            union.extend(self.egress_edges(node));
        }
        union.into_iter().collect()
    }

    /// Edges entering `node`, in ascending order of their source.
    pub fn ingress_edges(&self, node: &E::Node) -> Vec<E> {
        let mut edges: Vec<E> = self
            .edges
            .iter()
            .filter(|e| e.target() == node)
            .cloned()
            .collect();
        edges.sort_by(|a, b| (a.source(), a.target()).cmp(&(b.source(), b.target())));
        edges
    }

    /// Union of `ingress_edges` over the given nodes, preserving the input
    /// node order.
    pub fn ingress_edges_into_all<'a, I>(&self, nodes: I) -> Vec<E>
    where
        E::Node: 'a,
        I: IntoIterator<Item = &'a E::Node>,
    {
        let mut union: IndexSet<E> = IndexSet::new();
        for node in nodes {
            union.extend(self.ingress_edges(node));
        }
        union.into_iter().collect()
    }

    /// The sole edge leaving `node`, or an error describing why there is
    /// no single answer.
    pub fn unique_egress_edge(&self, node: &E::Node) -> Result<E, GraphError<E>> {
        let mut edges = self.egress_edges(node);
        match edges.len() {
            0 => Err(GraphError::MissingEgressEdges { from: node.clone() }),
            1 => Ok(edges.remove(0)),
            _ => Err(GraphError::AmbiguousEgressEdges {
                edges,
                from: node.clone(),
            }),
        }
    }

    /// The sole edge entering `node`, or an error describing why there is
    /// no single answer.
    pub fn unique_ingress_edge(&self, node: &E::Node) -> Result<E, GraphError<E>> {
        let mut edges = self.ingress_edges(node);
        match edges.len() {
            0 => Err(GraphError::MissingIngressEdges { to: node.clone() }),
            1 => Ok(edges.remove(0)),
            _ => Err(GraphError::AmbiguousIngressEdges {
                edges,
                to: node.clone(),
            }),
        }
    }

    /// Edges whose source is a true graph source (zero ingress edges
    /// anywhere). Empty for a fully cyclic or empty graph.
    pub fn inlets(&self) -> Vec<E> {
        let targets: AHashSet<&E::Node> = self.edges.iter().map(Edge::target).collect();
        let mut inlets: Vec<E> = self
            .edges
            .iter()
            .filter(|e| !targets.contains(e.source()))
            .cloned()
            .collect();
        inlets.sort_by(|a, b| (a.source(), a.target()).cmp(&(b.source(), b.target())));
        inlets
    }

    /// Edges whose target is a true graph sink (zero egress edges anywhere).
    pub fn outlets(&self) -> Vec<E> {
        let sources: AHashSet<&E::Node> = self.edges.iter().map(Edge::source).collect();
        let mut outlets: Vec<E> = self
            .edges
            .iter()
            .filter(|e| !sources.contains(e.target()))
            .cloned()
            .collect();
        outlets.sort_by(|a, b| (a.source(), a.target()).cmp(&(b.source(), b.target())));
        outlets
    }
}

impl<E: Edge> Default for DirectedGraph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Edge> FromIterator<E> for DirectedGraph<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<E: Edge> Extend<E> for DirectedGraph<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}

impl<E: Edge> IntoIterator for DirectedGraph<E> {
    type Item = E;
    type IntoIter = indexmap::set::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a, E: Edge> IntoIterator for &'a DirectedGraph<E> {
    type Item = &'a E;
    type IntoIter = indexmap::set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::DirectedEdge;

    fn edge(source: &'static str, target: &'static str) -> DirectedEdge<&'static str> {
        DirectedEdge::new(source, target)
    }

    fn graph(
        edges: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> DirectedGraph<DirectedEdge<&'static str>> {
        edges.into_iter().map(|(s, t)| edge(s, t)).collect()
    }

    #[test]
    fn membership_matches_the_edge_set() {
        let g = graph([("a", "b"), ("b", "c")]);
        assert!(g.has_edge(&edge("a", "b")));
        assert!(g.has_edge(&edge("b", "c")));
        assert!(!g.has_edge(&edge("a", "c")));
        assert!(!g.has_edge(&edge("b", "a")));
    }

    #[test]
    fn duplicate_edges_collapse() {
        let g = graph([("a", "b"), ("a", "b"), ("b", "c")]);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn node_membership_covers_both_endpoints() {
        let g = graph([("a", "b")]);
        assert!(g.has_node(&"a"));
        assert!(g.has_node(&"b"));
        assert!(!g.has_node(&"c"));
    }

    #[test]
    fn egress_union_preserves_input_node_order() {
        let g = graph([("c", "d"), ("a", "b"), ("b", "d"), ("a", "c")]);
        let union = g.egress_edges_from_all(["a", "c", "b"].iter());
        assert_eq!(
            union,
            vec![edge("a", "b"), edge("a", "c"), edge("c", "d"), edge("b", "d")]
        );
        // repeated input nodes add nothing
        let twice = g.egress_edges_from_all(["a", "a"].iter());
        assert_eq!(twice, vec![edge("a", "b"), edge("a", "c")]);
    }

    #[test]
    fn unique_egress_edge_errors_on_zero_and_many() {
        let g = graph([("a", "b"), ("a", "c"), ("b", "c")]);
        assert_eq!(g.unique_egress_edge(&"b"), Ok(edge("b", "c")));
        assert_eq!(
            g.unique_egress_edge(&"c"),
            Err(GraphError::MissingEgressEdges { from: "c" })
        );
        assert_eq!(
            g.unique_egress_edge(&"a"),
            Err(GraphError::AmbiguousEgressEdges {
                edges: vec![edge("a", "b"), edge("a", "c")],
                from: "a",
            })
        );
    }

    #[test]
    fn unique_ingress_edge_errors_on_zero_and_many() {
        let g = graph([("a", "c"), ("b", "c"), ("c", "d")]);
        assert_eq!(g.unique_ingress_edge(&"d"), Ok(edge("c", "d")));
        assert_eq!(
            g.unique_ingress_edge(&"a"),
            Err(GraphError::MissingIngressEdges { to: "a" })
        );
        assert_eq!(
            g.unique_ingress_edge(&"c"),
            Err(GraphError::AmbiguousIngressEdges {
                edges: vec![edge("a", "c"), edge("b", "c")],
                to: "c",
            })
        );
    }

    #[test]
    fn ingress_union_preserves_input_node_order() {
        let g = graph([("a", "c"), ("b", "c"), ("c", "d"), ("a", "d")]);
        let union = g.ingress_edges_into_all(["d", "c"].iter());
        assert_eq!(
            union,
            vec![edge("a", "d"), edge("c", "d"), edge("a", "c"), edge("b", "c")]
        );
    }

    #[test]
    fn removal_keeps_the_remaining_order() {
        let mut g = graph([("a", "b"), ("b", "c"), ("c", "d")]);
        assert!(g.remove(&edge("b", "c")));
        assert!(!g.remove(&edge("b", "c")));
        let left: Vec<_> = g.iter().cloned().collect();
        assert_eq!(left, vec![edge("a", "b"), edge("c", "d")]);
    }

    #[test]
    fn inlets_are_edges_out_of_true_sources() {
        let g = graph([("a", "b"), ("b", "c"), ("c", "b"), ("d", "b")]);
        assert_eq!(g.inlets(), vec![edge("a", "b"), edge("d", "b")]);
    }

    #[test]
    fn outlets_are_edges_into_true_sinks() {
        let g = graph([("a", "b"), ("b", "c"), ("b", "d"), ("d", "a")]);
        assert_eq!(g.outlets(), vec![edge("b", "c")]);
    }

    #[test]
    fn serde_shape_is_the_bare_edge_list() {
        let g = graph([("a", "b"), ("b", "c")]);
        let json = serde_json::to_value(&g).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "edges": [
                    { "source": "a", "target": "b" },
                    { "source": "b", "target": "c" },
                ]
            })
        );
    }

    #[test]
    fn inlets_and_outlets_empty_on_cyclic_or_empty_graphs() {
        let empty: DirectedGraph<DirectedEdge<&'static str>> = DirectedGraph::new();
        assert!(empty.inlets().is_empty());
        assert!(empty.outlets().is_empty());

        let ring = graph([("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(ring.inlets().is_empty());
        assert!(ring.outlets().is_empty());
    }
}
