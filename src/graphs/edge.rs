use serde::{Deserialize, Serialize};

use super::{VertexId, Weight};

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord, Debug)]
pub struct DirectedWeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl DirectedWeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> Option<DirectedWeightedEdge> {
        if tail == head {
            return None;
        }

        Some(DirectedWeightedEdge { tail, head, weight })
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn reversed(&self) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DirectedWeightedEdge;

    #[test]
    fn loops_are_rejected() {
        assert!(DirectedWeightedEdge::new(3, 3, 1).is_none());
    }

    #[test]
    fn reversed_swaps_endpoints() {
        let edge = DirectedWeightedEdge::new(1, 2, 7).unwrap();
        let reversed = edge.reversed();

        assert_eq!(reversed.tail(), 2);
        assert_eq!(reversed.head(), 1);
        assert_eq!(reversed.weight(), 7);
    }
}
