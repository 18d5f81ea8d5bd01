use std::{
    collections::VecDeque,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use super::{
    error::{PathError, PathResult},
    monoid::Monoid,
};

/// A concrete walk through a graph from a fixed `source` to a fixed `target`.
///
/// Vertices and edges are kept in two dense sequences. Edge lookups go
/// through index maps that store the logical position of an edge instead of
/// a second copy of it; positions stay valid under head insertion because
/// they are measured against the logical position of the front edge.
///
/// The path is grown by [`Path::extend_at_head`] and [`Path::extend_at_tail`].
/// Neither checks for duplicates: extending with a vertex pair or an edge
/// that is already part of the path silently overwrites its index entries.
#[derive(Clone)]
pub struct Path<V, E> {
    source: V,
    target: V,
    vertices: VecDeque<V>,
    edges: VecDeque<E>,
    // parallel to `edges`
    endpoints: VecDeque<(V, V)>,
    front_position: isize,
    target_placed: bool,
    successors: HashMap<V, V>,
    edge_positions: HashMap<(V, V), isize>,
    endpoint_positions: HashMap<E, isize>,
}

impl<V, E> Path<V, E>
where
    V: Hash + Eq + Clone + Debug,
    E: Hash + Eq + Clone + Debug,
{
    pub fn new(source: V, target: V) -> Path<V, E> {
        Path {
            source,
            target,
            vertices: VecDeque::new(),
            edges: VecDeque::new(),
            endpoints: VecDeque::new(),
            front_position: 0,
            target_placed: false,
            successors: HashMap::new(),
            edge_positions: HashMap::new(),
            endpoint_positions: HashMap::new(),
        }
    }

    /// Creates a path for endpoints that may be missing, e.g. when they come
    /// from a deserialized request.
    pub fn from_endpoints(source: Option<V>, target: Option<V>) -> PathResult<Path<V, E>> {
        let source = source
            .ok_or_else(|| PathError::InvalidArgument("path source cannot be absent".to_string()))?;
        let target = target
            .ok_or_else(|| PathError::InvalidArgument("path target cannot be absent".to_string()))?;
        Ok(Path::new(source, target))
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn target(&self) -> &V {
        &self.target
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> + DoubleEndedIterator + '_ {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = &E> + DoubleEndedIterator + '_ {
        self.edges.iter()
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Prepends `head` and `edge`. The first call also places `tail` when it
    /// is the target, seeding both ends of the path.
    pub fn extend_at_head(&mut self, head: V, edge: E, tail: V) {
        if tail == self.target && !self.target_placed {
            self.vertices.push_front(tail.clone());
            self.target_placed = true;
        }

        self.vertices.push_front(head.clone());
        self.edges.push_front(edge.clone());
        self.endpoints.push_front((head.clone(), tail.clone()));
        self.front_position -= 1;

        self.index_connection(self.front_position, head, edge, tail);
    }

    /// Appends `head` and `edge`, then `tail` if it is the target.
    pub fn extend_at_tail(&mut self, head: V, edge: E, tail: V) {
        if head == self.target {
            self.target_placed = true;
        }
        self.vertices.push_back(head.clone());
        self.edges.push_back(edge.clone());
        self.endpoints.push_back((head.clone(), tail.clone()));
        let position = self.front_position + self.edges.len() as isize - 1;

        if tail == self.target && !self.target_placed {
            self.vertices.push_back(tail.clone());
            self.target_placed = true;
        }

        self.index_connection(position, head, edge, tail);
    }

    fn index_connection(&mut self, position: isize, head: V, edge: E, tail: V) {
        self.successors.insert(head.clone(), tail.clone());
        self.edge_positions.insert((head, tail), position);
        self.endpoint_positions.insert(edge, position);
    }

    fn slot(&self, position: isize) -> Option<usize> {
        usize::try_from(position - self.front_position).ok()
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.successors.contains_key(vertex) || (self.target_placed && vertex == &self.target)
    }

    pub fn contains_edge(&self, edge: &E) -> bool {
        self.endpoint_positions.contains_key(edge)
    }

    /// 1 for the two ends of the path, 2 for every interior vertex.
    pub fn degree(&self, vertex: &V) -> PathResult<usize> {
        if !self.contains_vertex(vertex) {
            return Err(PathError::NotFound(format!("vertex {:?}", vertex)));
        }

        if vertex == &self.source || vertex == &self.target {
            return Ok(1);
        }

        Ok(2)
    }

    /// The vertex following `vertex`, `Ok(None)` for the target which has
    /// nothing after it.
    pub fn connected_vertices(&self, vertex: &V) -> PathResult<Option<&V>> {
        if vertex == &self.target {
            return Ok(None);
        }

        self.successors
            .get(vertex)
            .map(Some)
            .ok_or_else(|| PathError::NotFound(format!("vertex {:?}", vertex)))
    }

    pub fn edge_between(&self, head: &V, tail: &V) -> PathResult<&E> {
        self.edge_positions
            .get(&(head.clone(), tail.clone()))
            .and_then(|&position| self.slot(position))
            .and_then(|slot| self.edges.get(slot))
            .ok_or_else(|| PathError::NotFound(format!("edge from {:?} to {:?}", head, tail)))
    }

    pub fn endpoints_of(&self, edge: &E) -> PathResult<(&V, &V)> {
        self.endpoint_positions
            .get(edge)
            .and_then(|&position| self.slot(position))
            .and_then(|slot| self.endpoints.get(slot))
            .map(|(head, tail)| (head, tail))
            .ok_or_else(|| PathError::NotFound(format!("edge {:?}", edge)))
    }
}

impl<V: PartialEq, E: PartialEq> PartialEq for Path<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.vertices == other.vertices
            && self.edges == other.edges
    }
}

impl<V: Eq, E: Eq> Eq for Path<V, E> {}

impl<V: Hash, E: Hash> Hash for Path<V, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.vertices.hash(state);
        self.edges.hash(state);
    }
}

impl<V: Debug, E: Debug> Debug for Path<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}

impl<V: Debug, E: Debug> Display for Path<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path [vertices={:?}, edges={:?}]", self.vertices, self.edges)
    }
}

/// A [`Path`] that folds the weight of every added edge into a running total.
///
/// Each new edge is combined as `edge_weight ⊕ accumulated`, so with a
/// non-commutative rule the weight reads in the reverse order of insertion.
pub struct WeightedPath<'a, V, E, W> {
    path: Path<V, E>,
    weight: W,
    monoid: &'a dyn Monoid<Weight = W>,
    edge_weight: &'a dyn Fn(&E) -> W,
}

impl<'a, V, E, W> WeightedPath<'a, V, E, W>
where
    V: Hash + Eq + Clone + Debug,
    E: Hash + Eq + Clone + Debug,
{
    pub fn new(
        source: V,
        target: V,
        monoid: &'a dyn Monoid<Weight = W>,
        edge_weight: &'a dyn Fn(&E) -> W,
    ) -> WeightedPath<'a, V, E, W> {
        WeightedPath {
            path: Path::new(source, target),
            weight: monoid.identity(),
            monoid,
            edge_weight,
        }
    }

    pub fn extend_at_head(&mut self, head: V, edge: E, tail: V) {
        self.increase_weight(&edge);
        self.path.extend_at_head(head, edge, tail);
    }

    pub fn extend_at_tail(&mut self, head: V, edge: E, tail: V) {
        self.increase_weight(&edge);
        self.path.extend_at_tail(head, edge, tail);
    }

    fn increase_weight(&mut self, edge: &E) {
        let accumulated = std::mem::replace(&mut self.weight, self.monoid.identity());
        self.weight = self.monoid.combine((self.edge_weight)(edge), accumulated);
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }

    pub fn path(&self) -> &Path<V, E> {
        &self.path
    }

    pub fn to_record(&self) -> PathRecord<V, E, W>
    where
        W: Clone,
    {
        PathRecord {
            source: self.path.source.clone(),
            target: self.path.target.clone(),
            vertices: self.path.vertices.iter().cloned().collect(),
            edges: self.path.edges.iter().cloned().collect(),
            weight: self.weight.clone(),
        }
    }
}

impl<'a, V: PartialEq, E: PartialEq, W: PartialEq> PartialEq for WeightedPath<'a, V, E, W> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.weight == other.weight
    }
}

impl<'a, V: Eq, E: Eq, W: Eq> Eq for WeightedPath<'a, V, E, W> {}

impl<'a, V: Hash, E: Hash, W: Hash> Hash for WeightedPath<'a, V, E, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.weight.hash(state);
    }
}

impl<'a, V: Debug, E: Debug, W: Debug> Debug for WeightedPath<'a, V, E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedPath")
            .field("path", &self.path)
            .field("weight", &self.weight)
            .finish()
    }
}

impl<'a, V: Debug, E: Debug, W: Debug> Display for WeightedPath<'a, V, E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeightedPath [weight={:?}, vertices={:?}, edges={:?}]",
            self.weight, self.path.vertices, self.path.edges
        )
    }
}

/// Owned snapshot of a weighted path, suitable for serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathRecord<V, E, W> {
    pub source: V,
    pub target: V,
    pub vertices: Vec<V>,
    pub edges: Vec<E>,
    pub weight: W,
}
