use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use super::{edge::DirectedWeightedEdge, hash_graph::HashGraph, EdgeValueGraph, VertexId, Weight};
use crate::search::path::Path;

pub fn add_edge_bidrectional(graph: &mut HashGraph, edge: &DirectedWeightedEdge) {
    graph.set_edge(edge);
    graph.set_edge(&edge.reversed());
}

/// Sum of the edge weights along `vertices`, `None` if two consecutive
/// vertices are not connected.
pub fn path_weight(
    graph: &dyn EdgeValueGraph<VertexId, DirectedWeightedEdge>,
    vertices: &[VertexId],
) -> Option<Weight> {
    vertices
        .iter()
        .tuple_windows()
        .map(|(tail, head)| graph.edge_value(tail, head).map(|edge| edge.weight()))
        .sum()
}

/// Check that a reconstructed path is a real walk through `graph`.
pub fn validate_path<V, E>(graph: &dyn EdgeValueGraph<V, E>, path: &Path<V, E>) -> Result<(), String>
where
    V: Hash + Eq + Clone + Debug,
    E: Hash + Eq + Clone + Debug,
{
    if path.order() == 0 {
        if path.source() != path.target() {
            return Err("path is empty".to_string());
        }
        return Ok(());
    }

    if path.vertices().next() != Some(path.source()) {
        return Err("first vertex of path is not its source".to_string());
    }
    if path.vertices().last() != Some(path.target()) {
        return Err("last vertex of path is not its target".to_string());
    }
    if path.size() + 1 != path.order() {
        return Err(format!(
            "path has {} vertices but {} edges",
            path.order(),
            path.size()
        ));
    }

    for ((tail, head), edge) in path.vertices().tuple_windows().zip(path.edges()) {
        match graph.edge_value(tail, head) {
            Some(graph_edge) if &graph_edge == edge => {}
            Some(_) => {
                return Err(format!(
                    "edge between {:?} and {:?} differs from the graph",
                    tail, head
                ))
            }
            None => return Err(format!("no edge between {:?} and {:?} found", tail, head)),
        }
    }

    Ok(())
}
