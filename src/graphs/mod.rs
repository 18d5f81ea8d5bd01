use std::hash::Hash;

use ahash::HashMap;

pub mod edge;
pub mod graph_functions;
pub mod hash_graph;

pub type VertexId = u32;
pub type Weight = u32;

/// The only view of a graph path reconstruction needs.
///
/// Given an ordered pair of vertices, return the value of the edge leading
/// from `tail` to `head`, or `None` if there is no such edge. Undirected
/// graphs answer both orientations.
pub trait EdgeValueGraph<V, E> {
    fn edge_value(&self, tail: &V, head: &V) -> Option<E>;
}

impl<V, E> EdgeValueGraph<V, E> for HashMap<(V, V), E>
where
    V: Hash + Eq + Clone,
    E: Clone,
{
    fn edge_value(&self, tail: &V, head: &V) -> Option<E> {
        self.get(&(tail.clone(), head.clone())).cloned()
    }
}
