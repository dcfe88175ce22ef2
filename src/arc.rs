use std::fmt::{Debug, Display};

use crate::node::NodeId;

/// Weight of a single arc.
///
/// Weights are unsigned by type: the searches in [`crate::algo`] require
/// non-negative weights, so we rule negative values out instead of checking
/// for them at runtime.
pub type Weight = u32;

/// Accumulated path costs (g, h and f = g + h).
///
/// Wider than [`Weight`] so that summing arbitrarily many arc weights along
/// a path cannot overflow.
pub type Cost = u64;

/// A directed, weighted edge pointing at a target node.
///
/// Arcs are owned by their source node and stored in its arc list; the
/// target is referenced by slot index only. The graph keeps the referenced
/// slot alive for as long as the arc exists.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Arc {
    target: NodeId,
    weight: Weight,
}

impl Arc {
    pub(crate) fn new(target: NodeId, weight: Weight) -> Self {
        Self { target, weight }
    }

    /// Returns the slot index of the node this arc points at
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the weight of the arc
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

impl Display for Arc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(->{}, w={})", self.target, self.weight)
    }
}

impl Debug for Arc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
