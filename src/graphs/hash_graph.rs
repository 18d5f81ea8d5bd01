use std::collections::hash_map::Entry::{Occupied, Vacant};

use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use super::{edge::DirectedWeightedEdge, EdgeValueGraph, VertexId, Weight};

/// Directed graph storing the out edges of every vertex in a hash map.
///
/// Parallel edges collapse onto the lightest one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HashGraph {
    pub out_edges: Vec<HashMap<VertexId, Weight>>,
}

impl Default for HashGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeValueGraph<VertexId, DirectedWeightedEdge> for HashGraph {
    fn edge_value(&self, tail: &VertexId, head: &VertexId) -> Option<DirectedWeightedEdge> {
        let weight = *self.out_edges.get(*tail as usize)?.get(head)?;
        DirectedWeightedEdge::new(*tail, *head, weight)
    }
}

impl HashGraph {
    pub fn new() -> Self {
        HashGraph {
            out_edges: Vec::new(),
        }
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    pub fn out_edges(&self, tail: VertexId) -> impl Iterator<Item = DirectedWeightedEdge> + '_ {
        self.out_edges
            .get(tail as usize)
            .into_iter()
            .flat_map(move |edges| {
                edges
                    .iter()
                    .filter_map(move |(&head, &weight)| DirectedWeightedEdge::new(tail, head, weight))
            })
    }

    pub fn set_edge(&mut self, edge: &DirectedWeightedEdge) {
        let number_of_vertices = edge.tail().max(edge.head()) + 1;
        if (self.out_edges.len() as u32) < number_of_vertices {
            self.out_edges
                .resize(number_of_vertices as usize, HashMap::new());
        }

        match self.out_edges[edge.tail() as usize].entry(edge.head()) {
            Occupied(mut o) => {
                let current_weight = o.get_mut();
                if &edge.weight() < current_weight {
                    *current_weight = edge.weight();
                }
            }
            Vacant(v) => {
                v.insert(edge.weight());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HashGraph;
    use crate::graphs::{edge::DirectedWeightedEdge, EdgeValueGraph};

    #[test]
    fn keeps_lightest_parallel_edge() {
        let mut graph = HashGraph::new();
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 5).unwrap());
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 3).unwrap());
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 4).unwrap());

        assert_eq!(graph.out_edges(0).count(), 1);
        assert_eq!(graph.edge_value(&0, &1).map(|edge| edge.weight()), Some(3));
    }

    #[test]
    fn edge_value_is_directed() {
        let mut graph = HashGraph::new();
        graph.set_edge(&DirectedWeightedEdge::new(2, 4, 1).unwrap());

        assert_eq!(graph.number_of_vertices(), 5);
        assert!(graph.edge_value(&2, &4).is_some());
        assert!(graph.edge_value(&4, &2).is_none());
        assert!(graph.edge_value(&9, &2).is_none());
    }
}
