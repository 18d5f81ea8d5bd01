use std::{fmt::Debug, hash::Hash};

use ahash::{HashMap, HashMapExt};
use tracing::{debug, trace};

use super::{
    error::{PathError, PathResult},
    monoid::Monoid,
    path::WeightedPath,
};
use crate::graphs::EdgeValueGraph;

/// Predecessor relation recorded by a traversal, plus what is needed to turn
/// it back into weighted paths.
///
/// Every vertex has at most one predecessor. Recording a predecessor for a
/// vertex that already has one replaces it: last write wins, insertion order
/// is irrelevant.
///
/// The graph, the weight rule and the edge weight projection are borrowed for
/// the lifetime of the list.
pub struct PredecessorsList<'a, V, E, W> {
    graph: &'a dyn EdgeValueGraph<V, E>,
    monoid: &'a dyn Monoid<Weight = W>,
    edge_weight: &'a dyn Fn(&E) -> W,
    predecessors: HashMap<V, V>,
}

impl<'a, V, E, W> PredecessorsList<'a, V, E, W>
where
    V: Hash + Eq + Clone + Debug,
    E: Hash + Eq + Clone + Debug,
{
    pub fn new(
        graph: &'a dyn EdgeValueGraph<V, E>,
        monoid: &'a dyn Monoid<Weight = W>,
        edge_weight: &'a dyn Fn(&E) -> W,
    ) -> PredecessorsList<'a, V, E, W> {
        PredecessorsList {
            graph,
            monoid,
            edge_weight,
            predecessors: HashMap::new(),
        }
    }

    /// Records that `vertex` was reached from `predecessor`, returning the
    /// predecessor it replaces.
    pub fn add_predecessor(&mut self, vertex: V, predecessor: V) -> Option<V> {
        self.predecessors.insert(vertex, predecessor)
    }

    pub fn predecessor(&self, vertex: &V) -> Option<&V> {
        self.predecessors.get(vertex)
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Forgets all recorded predecessors so the list can serve another search.
    pub fn clear(&mut self) {
        self.predecessors.clear();
    }

    /// Builds the path from `source` to `target` by walking the predecessors
    /// back from `target`.
    pub fn build_path(&self, source: V, target: V) -> PathResult<WeightedPath<'a, V, E, W>> {
        debug!(?source, ?target, "building path");
        let mut path = WeightedPath::new(
            source.clone(),
            target.clone(),
            self.monoid,
            self.edge_weight,
        );

        self.walk_to_source(&mut path, &source, &target, target.clone())?;

        debug!(vertices = path.path().order(), "built path");
        Ok(path)
    }

    /// Builds the path from `source` to `target` through `touch`, the vertex
    /// where a forward search (recorded in `self`) met a backward search
    /// (recorded in `backward`).
    ///
    /// The predecessor of a vertex in `backward` is its successor towards
    /// `target`. Both halves are written into one path, so the weight covers
    /// the whole route.
    pub fn build_bidirectional_path(
        &self,
        source: V,
        touch: V,
        target: V,
        backward: &PredecessorsList<'_, V, E, W>,
    ) -> PathResult<WeightedPath<'a, V, E, W>> {
        debug!(?source, ?touch, ?target, "building bidirectional path");
        let mut path = WeightedPath::new(
            source.clone(),
            target.clone(),
            self.monoid,
            self.edge_weight,
        );

        self.walk_to_source(&mut path, &source, &target, touch.clone())?;

        self.follow(
            &backward.predecessors,
            touch,
            &target,
            (&source, &target),
            |vertex, successor| {
                let edge = self.edge(&vertex, &successor)?;
                trace!(?vertex, ?successor, "extending at tail");
                path.extend_at_tail(vertex, edge, successor);
                Ok(())
            },
        )?;

        debug!(vertices = path.path().order(), "built bidirectional path");
        Ok(path)
    }

    /// Walks from `start` back to `source`, prepending every connection.
    fn walk_to_source(
        &self,
        path: &mut WeightedPath<'a, V, E, W>,
        source: &V,
        target: &V,
        start: V,
    ) -> PathResult<()> {
        self.follow(
            &self.predecessors,
            start,
            source,
            (source, target),
            |vertex, predecessor| {
                let edge = self.edge(&predecessor, &vertex)?;
                trace!(?predecessor, ?vertex, "extending at head");
                path.extend_at_head(predecessor, edge, vertex);
                Ok(())
            },
        )
    }

    /// Follows `links` from `start` until `stop`, handing every step to
    /// `connect` as `(vertex, linked vertex)`.
    ///
    /// A walk can take at most one step per link; any further step means the
    /// links form a cycle.
    fn follow(
        &self,
        links: &HashMap<V, V>,
        start: V,
        stop: &V,
        (source, target): (&V, &V),
        mut connect: impl FnMut(V, V) -> PathResult<()>,
    ) -> PathResult<()> {
        let mut vertex = start;
        let mut steps = 0;
        while &vertex != stop {
            let linked = links.get(&vertex).cloned().ok_or_else(|| {
                debug!(?vertex, ?stop, "predecessors end early");
                PathError::path_not_found(source, target)
            })?;
            steps += 1;
            if steps > links.len() {
                return Err(PathError::CycleDetected {
                    vertex: format!("{:?}", vertex),
                });
            }

            connect(vertex, linked.clone())?;
            vertex = linked;
        }

        Ok(())
    }

    fn edge(&self, tail: &V, head: &V) -> PathResult<E> {
        self.graph
            .edge_value(tail, head)
            .ok_or_else(|| PathError::missing_edge(tail, head))
    }
}

#[cfg(test)]
mod tests {
    use ahash::{HashMap, HashMapExt};

    use super::PredecessorsList;
    use crate::search::{
        error::PathError,
        monoid::{Addition, Concatenation},
    };

    type Edges = HashMap<(char, char), String>;

    fn line(vertices: &str) -> Edges {
        let vertices: Vec<char> = vertices.chars().collect();
        let mut edges = HashMap::new();
        for pair in vertices.windows(2) {
            edges.insert((pair[0], pair[1]), format!("{}{}", pair[0], pair[1]));
        }
        edges
    }

    fn unit(_: &String) -> u32 {
        1
    }

    fn label(edge: &String) -> String {
        edge.clone()
    }

    #[test]
    fn builds_chain() {
        let graph = line("ABCD");
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);
        predecessors.add_predecessor('B', 'A');
        predecessors.add_predecessor('C', 'B');
        predecessors.add_predecessor('D', 'C');

        let path = predecessors.build_path('A', 'D').unwrap();

        assert_eq!(
            path.path().vertices().copied().collect::<Vec<_>>(),
            vec!['A', 'B', 'C', 'D']
        );
        assert_eq!(
            path.path().edges().cloned().collect::<Vec<_>>(),
            vec!["AB", "BC", "CD"]
        );
        assert_eq!(path.weight(), &3);
    }

    #[test]
    fn gap_is_path_not_found() {
        let graph = line("ABC");
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);
        predecessors.add_predecessor('B', 'A');

        assert!(matches!(
            predecessors.build_path('A', 'C'),
            Err(PathError::PathNotFound { .. })
        ));
    }

    #[test]
    fn last_write_wins() {
        let mut graph = line("ABD");
        graph.insert(('C', 'D'), "CD".to_string());
        graph.insert(('A', 'C'), "AC".to_string());
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);

        assert!(predecessors.is_empty());
        predecessors.add_predecessor('B', 'A');
        predecessors.add_predecessor('C', 'A');
        assert_eq!(predecessors.add_predecessor('D', 'B'), None);
        assert_eq!(predecessors.add_predecessor('D', 'C'), Some('B'));
        assert!(!predecessors.is_empty());
        assert_eq!(predecessors.len(), 3);

        let path = predecessors.build_path('A', 'D').unwrap();
        assert_eq!(
            path.path().vertices().copied().collect::<Vec<_>>(),
            vec!['A', 'C', 'D']
        );
    }

    #[test]
    fn source_equals_target_is_empty_path() {
        let graph = line("AB");
        let addition = Addition::<u32>::new();
        let predecessors = PredecessorsList::new(&graph, &addition, &unit);

        let path = predecessors.build_path('A', 'A').unwrap();
        assert_eq!(path.path().order(), 0);
        assert_eq!(path.weight(), &0);
    }

    #[test]
    fn missing_graph_edge_is_reported() {
        let graph = line("AB");
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);
        predecessors.add_predecessor('B', 'A');
        predecessors.add_predecessor('C', 'B');

        assert!(matches!(
            predecessors.build_path('A', 'C'),
            Err(PathError::MissingEdge { .. })
        ));
    }

    #[test]
    fn cycle_is_detected() {
        let mut graph = line("ABC");
        graph.insert(('C', 'B'), "CB".to_string());
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);
        predecessors.add_predecessor('B', 'C');
        predecessors.add_predecessor('C', 'B');

        assert!(matches!(
            predecessors.build_path('A', 'C'),
            Err(PathError::CycleDetected { .. })
        ));
    }

    #[test]
    fn bidirectional_matches_single_direction() {
        let graph = line("ABCDE");
        let addition = Addition::<u32>::new();

        let mut full = PredecessorsList::new(&graph, &addition, &unit);
        let mut forward = PredecessorsList::new(&graph, &addition, &unit);
        let mut backward = PredecessorsList::new(&graph, &addition, &unit);
        for (vertex, predecessor) in [('B', 'A'), ('C', 'B'), ('D', 'C'), ('E', 'D')] {
            full.add_predecessor(vertex, predecessor);
        }
        forward.add_predecessor('B', 'A');
        forward.add_predecessor('C', 'B');
        backward.add_predecessor('D', 'E');
        backward.add_predecessor('C', 'D');

        let expected = full.build_path('A', 'E').unwrap();
        let path = forward
            .build_bidirectional_path('A', 'C', 'E', &backward)
            .unwrap();

        assert_eq!(path, expected);
        assert_eq!(path.weight(), &4);
        assert_eq!(path.path().degree(&'C'), Ok(2));
    }

    #[test]
    fn bidirectional_touch_at_either_end() {
        let graph = line("ABC");
        let addition = Addition::<u32>::new();

        let mut full = PredecessorsList::new(&graph, &addition, &unit);
        full.add_predecessor('B', 'A');
        full.add_predecessor('C', 'B');
        let expected = full.build_path('A', 'C').unwrap();

        let empty = PredecessorsList::new(&graph, &addition, &unit);
        let mut backward = PredecessorsList::new(&graph, &addition, &unit);
        backward.add_predecessor('A', 'B');
        backward.add_predecessor('B', 'C');

        let at_source = empty
            .build_bidirectional_path('A', 'A', 'C', &backward)
            .unwrap();
        let at_target = full
            .build_bidirectional_path('A', 'C', 'C', &empty)
            .unwrap();

        assert_eq!(at_source, expected);
        assert_eq!(at_target, expected);
    }

    #[test]
    fn bidirectional_gap_in_backward_half() {
        let graph = line("ABCD");
        let addition = Addition::<u32>::new();
        let mut forward = PredecessorsList::new(&graph, &addition, &unit);
        forward.add_predecessor('B', 'A');
        let mut backward = PredecessorsList::new(&graph, &addition, &unit);
        backward.add_predecessor('C', 'D');

        assert!(matches!(
            forward.build_bidirectional_path('A', 'B', 'D', &backward),
            Err(PathError::PathNotFound { .. })
        ));
    }

    #[test]
    fn weight_is_folded_in_source_to_target_order() {
        let graph = line("ABCD");
        let concatenation = Concatenation;
        let mut predecessors = PredecessorsList::new(&graph, &concatenation, &label);
        predecessors.add_predecessor('B', 'A');
        predecessors.add_predecessor('C', 'B');
        predecessors.add_predecessor('D', 'C');

        let path = predecessors.build_path('A', 'D').unwrap();
        assert_eq!(path.weight(), "ABBCCD");
    }

    #[test]
    fn bidirectional_weight_appends_tail_half_in_front() {
        let graph = line("ABCDE");
        let concatenation = Concatenation;
        let mut forward = PredecessorsList::new(&graph, &concatenation, &label);
        forward.add_predecessor('B', 'A');
        forward.add_predecessor('C', 'B');
        let mut backward = PredecessorsList::new(&graph, &concatenation, &label);
        backward.add_predecessor('C', 'D');
        backward.add_predecessor('D', 'E');

        let path = forward
            .build_bidirectional_path('A', 'C', 'E', &backward)
            .unwrap();

        assert_eq!(
            path.path().vertices().copied().collect::<Vec<_>>(),
            vec!['A', 'B', 'C', 'D', 'E']
        );
        assert_eq!(path.weight(), "DECDABBC");
    }

    #[test]
    fn cycle_in_backward_half_is_detected() {
        let mut graph = line("ABCDE");
        graph.insert(('D', 'C'), "DC".to_string());
        let addition = Addition::<u32>::new();
        let mut forward = PredecessorsList::new(&graph, &addition, &unit);
        forward.add_predecessor('B', 'A');
        forward.add_predecessor('C', 'B');
        let mut backward = PredecessorsList::new(&graph, &addition, &unit);
        backward.add_predecessor('C', 'D');
        backward.add_predecessor('D', 'C');

        assert!(matches!(
            forward.build_bidirectional_path('A', 'C', 'E', &backward),
            Err(PathError::CycleDetected { .. })
        ));
    }

    #[test]
    fn cleared_list_is_empty() {
        let graph = line("AB");
        let addition = Addition::<u32>::new();
        let mut predecessors = PredecessorsList::new(&graph, &addition, &unit);
        predecessors.add_predecessor('B', 'A');
        predecessors.clear();

        assert!(predecessors.is_empty());
        assert_eq!(predecessors.predecessor(&'B'), None);
    }
}
