//! Traversal - Deterministic DFS, Cycle Hunt, Component Split
//!
//! All traversals scan roots in ascending node order and visit egress edges
//! in ascending target order, so identical edge sets always walk the same
//! way. Each call recomputes from scratch; none of these sequences is
//! restartable mid-way.

use crate::edge::Edge;
use crate::graph::DirectedGraph;
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

impl<E: Edge> DirectedGraph<E> {
    /// Every edge exactly once, in depth-first order.
    ///
    /// Already-visited targets are not re-descended into, but the edge that
    /// reaches them is still emitted, so the output is finite even over
    /// cyclic graphs.
    pub fn dfs(&self) -> Vec<E> {
        let mut roots: Vec<E::Node> = self.nodes().into_iter().collect();
        roots.sort();

        let mut visited: AHashSet<E::Node> = AHashSet::new();
        let mut out = Vec::with_capacity(self.len());
        for root in &roots {
            if !visited.contains(root) {
                self.descend(root, &mut visited, &mut out);
            }
        }
        out
    }

    fn descend(&self, node: &E::Node, visited: &mut AHashSet<E::Node>, out: &mut Vec<E>) {
        visited.insert(node.clone());
        for edge in self.egress_edges(node) {
            let target = edge.target().clone();
            out.push(edge);
            if !visited.contains(&target) {
                self.descend(&target, visited, out);
            }
        }
    }

    /// True iff a directed cycle exists anywhere in the graph.
    ///
    /// A self-loop counts as a cycle.
    pub fn has_cycle(&self) -> bool {
        self.first_cycle().is_some()
    }

    /// The ordered edge sequence of the first cycle the deterministic DFS
    /// discovers, or `None` if the graph is acyclic.
    pub fn first_cycle(&self) -> Option<Vec<E>> {
        let mut roots: Vec<E::Node> = self.nodes().into_iter().collect();
        roots.sort();

        let mut settled: AHashSet<E::Node> = AHashSet::new();
        for root in &roots {
            if settled.contains(root) {
                continue;
            }
            let mut on_stack: AHashSet<E::Node> = AHashSet::new();
            let mut trail: Vec<E> = Vec::new();
            if let Some(cycle) = self.hunt(root, &mut settled, &mut on_stack, &mut trail) {
                return Some(cycle);
            }
        }
        None
    }

    /// DFS step for the cycle hunt: `on_stack` marks the active recursion
    /// path, `settled` marks fully explored nodes, `trail` mirrors the edge
    /// path down to the current node.
    fn hunt(
        &self,
        node: &E::Node,
        settled: &mut AHashSet<E::Node>,
        on_stack: &mut AHashSet<E::Node>,
        trail: &mut Vec<E>,
    ) -> Option<Vec<E>> {
        on_stack.insert(node.clone());
        for edge in self.egress_edges(node) {
            let target = edge.target().clone();
            if on_stack.contains(&target) {
                // back-edge: the cycle is the trail suffix that starts at the target
                trail.push(edge);
                let start = trail
                    .iter()
                    .position(|e| e.source() == &target)
                    .unwrap_or(trail.len() - 1);
                return Some(trail[start..].to_vec());
            }
            if !settled.contains(&target) {
                trail.push(edge);
                if let Some(cycle) = self.hunt(&target, settled, on_stack, trail) {
                    return Some(cycle);
                }
                trail.pop();
            }
        }
        on_stack.remove(node);
        settled.insert(node.clone());
        None
    }

    /// Partition the edge set into weakly-connected components, each its own
    /// graph. Components and their member edges follow the deterministic DFS
    /// order; the empty graph yields no components.
    pub fn disconnected_subgraphs(&self) -> Vec<DirectedGraph<E>> {
        let order = self.dfs();
        if order.is_empty() {
            return Vec::new();
        }

        let mut ids: AHashMap<E::Node, usize> = AHashMap::new();
        for edge in &order {
            for node in [edge.source(), edge.target()] {
                let next = ids.len();
                ids.entry(node.clone()).or_insert(next);
            }
        }

        let mut forest = Forest::new(ids.len());
        for edge in &order {
            forest.union(ids[edge.source()], ids[edge.target()]);
        }

        let mut components: IndexMap<usize, DirectedGraph<E>> = IndexMap::new();
        for edge in order {
            let root = forest.find(ids[edge.source()]);
            components.entry(root).or_default().insert(edge);
        }
        components.into_values().collect()
    }
}

/// Minimal union-find over dense indices, with path compression.
struct Forest {
    parent: Vec<usize>,
}

impl Forest {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
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
    fn dfs_emits_every_edge_exactly_once() {
        let g = graph([("a", "b"), ("b", "c"), ("c", "a"), ("b", "d")]);
        let order = g.dfs();
        assert_eq!(order.len(), g.len());
        for e in g.iter() {
            assert!(order.contains(e));
        }
    }

    #[test]
    fn dfs_is_deterministic_across_calls() {
        let g = graph([("d", "b"), ("a", "b"), ("c", "b"), ("b", "c")]);
        assert_eq!(g.dfs(), g.dfs());
    }

    #[test]
    fn dfs_order_is_insertion_independent() {
        let forward = graph([("a", "b"), ("a", "c"), ("c", "d")]);
        let backward = graph([("c", "d"), ("a", "c"), ("a", "b")]);
        assert_eq!(forward.dfs(), backward.dfs());
        assert_eq!(
            forward.dfs(),
            vec![edge("a", "b"), edge("a", "c"), edge("c", "d")]
        );
    }

    #[test]
    fn cycle_detection_on_the_reference_shapes() {
        let cyclic = graph([("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")]);
        assert!(cyclic.has_cycle());

        let diamond = graph([("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")]);
        assert!(!diamond.has_cycle());

        let empty: DirectedGraph<DirectedEdge<&'static str>> = DirectedGraph::new();
        assert!(!empty.has_cycle());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let g = graph([("a", "a")]);
        assert!(g.has_cycle());
        assert_eq!(g.first_cycle(), Some(vec![edge("a", "a")]));
    }

    #[test]
    fn first_cycle_returns_the_loop_edges_in_order() {
        let g = graph([("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")]);
        assert_eq!(
            g.first_cycle(),
            Some(vec![edge("b", "c"), edge("c", "d"), edge("d", "b")])
        );

        let acyclic = graph([("a", "b"), ("b", "c")]);
        assert_eq!(acyclic.first_cycle(), None);
    }

    #[test]
    fn components_partition_the_edge_set() {
        let g = graph([("a", "b"), ("b", "c"), ("a", "c"), ("d", "e"), ("d", "f")]);
        let parts = g.disconnected_subgraphs();
        assert_eq!(parts.len(), 2);

        let total: usize = parts.iter().map(DirectedGraph::len).sum();
        assert_eq!(total, g.len());

        // edges sharing a node land in the same component
        assert!(parts[0].has_edge(&edge("a", "b")));
        assert!(parts[0].has_edge(&edge("b", "c")));
        assert!(parts[0].has_edge(&edge("a", "c")));
        assert!(parts[1].has_edge(&edge("d", "e")));
        assert!(parts[1].has_edge(&edge("d", "f")));
    }

    #[test]
    fn components_of_the_empty_graph() {
        let empty: DirectedGraph<DirectedEdge<&'static str>> = DirectedGraph::new();
        assert!(empty.disconnected_subgraphs().is_empty());
    }
}
