/*!
# Slot Graph

[`SlotGraph`] is a fixed-capacity graph whose nodes live in slots addressed
by caller-chosen integer indices. Every slot is either vacant or holds one
owned [`Node`]; arcs reference their target by slot index and are owned by
the source node's arc list.

The representation is deliberately simple: occupancy checks are total
(`Option` per slot, no null sentinel), arc lookup and removal are linear
scans of the source arc list, and removing a node scans every other
occupied slot to purge arcs targeting it.

Mutating operations that can fail report a [`GraphError`]; removals return
a bool so "removed" and "nothing to do" stay distinguishable.
*/

use thiserror::Error;

use crate::{
    arc::{Arc, Weight},
    geom::Point,
    node::{Node, NodeId, NumNodes},
};

/// Local, recoverable failure conditions of graph mutation.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The slot index lies outside the graph capacity
    #[error("slot {0} lies outside the graph capacity")]
    SlotOutOfRange(NodeId),

    /// `add_node` targeted a slot that already holds a node
    #[error("slot {0} is already occupied")]
    SlotOccupied(NodeId),

    /// An arc operation referenced a vacant slot
    #[error("slot {0} is vacant")]
    MissingEndpoint(NodeId),

    /// `add_arc` targeted an already-connected ordered pair
    #[error("an arc {0} -> {1} already exists")]
    DuplicateArc(NodeId, NodeId),
}

/// A fixed-capacity collection of node slots plus the search algorithms in
/// [`crate::algo`].
pub struct SlotGraph<D> {
    slots: Vec<Option<Node<D>>>,
    num_nodes: NumNodes,
}

impl<D> SlotGraph<D> {
    /// Creates an empty graph with `capacity` vacant slots
    pub fn new(capacity: NumNodes) -> Self {
        assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            num_nodes: 0,
        }
    }

    /// Returns the fixed number of slots
    pub fn capacity(&self) -> NumNodes {
        self.slots.len() as NumNodes
    }

    /// Returns the number of occupied slots
    pub fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    /// Returns *true* if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Returns the node at slot `u`, or `None` for vacant or out-of-range slots
    pub fn node(&self, u: NodeId) -> Option<&Node<D>> {
        self.slots.get(u as usize)?.as_ref()
    }

    /// Returns the node at slot `u` mutably, or `None` for vacant or
    /// out-of-range slots
    pub fn node_mut(&mut self, u: NodeId) -> Option<&mut Node<D>> {
        self.slots.get_mut(u as usize)?.as_mut()
    }

    /// Returns an iterator over the occupied slot indices in slot order
    pub fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().map(Node::id)
    }

    /// Returns an iterator over the live nodes in slot order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<D>> + '_ {
        self.slots.iter().flatten()
    }

    /// Tries to create a node at slot `u` holding `data`.
    ///
    /// The new node starts unmarked, with unset g- and h-costs, no
    /// back-pointer and an empty arc list. Fails without mutation if the
    /// slot is occupied or out of range.
    pub fn try_add_node(&mut self, u: NodeId, data: D, position: Point) -> Result<(), GraphError> {
        let slot = self
            .slots
            .get_mut(u as usize)
            .ok_or(GraphError::SlotOutOfRange(u))?;
        if slot.is_some() {
            return Err(GraphError::SlotOccupied(u));
        }

        *slot = Some(Node::new(u, data, position));
        self.num_nodes += 1;
        Ok(())
    }

    /// Creates a node at slot `u`.
    /// ** Panics if the slot is occupied or out of range **
    pub fn add_node(&mut self, u: NodeId, data: D, position: Point) {
        assert!(self.try_add_node(u, data, position).is_ok());
    }

    /// Removes the node at slot `u` along with every arc in the graph that
    /// targets it. Returns *true* exactly if a node was removed; vacant and
    /// out-of-range slots are a no-op.
    ///
    /// Cost is proportional to the total node count times the average degree.
    pub fn try_remove_node(&mut self, u: NodeId) -> bool {
        if self.node(u).is_none() {
            return false;
        }

        // Purge incoming arcs first so no arc ever targets a vacant slot.
        for slot in self.slots.iter_mut().flatten() {
            slot.remove_arc_to(u);
        }

        self.slots[u as usize] = None;
        self.num_nodes -= 1;
        true
    }

    /// Tries to add a directed arc `from -> to` with the given weight.
    ///
    /// Fails without mutation if either slot is vacant or out of range, or
    /// if an arc `from -> to` already exists.
    pub fn try_add_arc(&mut self, from: NodeId, to: NodeId, weight: Weight) -> Result<(), GraphError> {
        self.check_occupied(from)?;
        self.check_occupied(to)?;

        if self.arc_between(from, to).is_some() {
            return Err(GraphError::DuplicateArc(from, to));
        }

        self.node_ref_mut(from).push_arc(to, weight);
        Ok(())
    }

    /// Adds a directed arc `from -> to`.
    /// ** Panics if an endpoint is missing or the arc already exists **
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        assert!(self.try_add_arc(from, to, weight).is_ok());
    }

    /// Tries to add the arc pair `from -> to` and `to -> from`, both with
    /// the given weight.
    ///
    /// The two arcs are independent afterwards: removing one does not remove
    /// the other. Only the forward direction is checked for duplicates; the
    /// reverse arc is appended unconditionally, matching the historical
    /// contract of undirected insertion.
    pub fn try_add_arc_undirected(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.try_add_arc(from, to, weight)?;
        self.node_ref_mut(to).push_arc(from, weight);
        Ok(())
    }

    /// Removes the arc `from -> to` if both slots are occupied and the arc
    /// exists. Returns *true* exactly if an arc was removed. Any `to -> from`
    /// arc is left untouched.
    pub fn try_remove_arc(&mut self, from: NodeId, to: NodeId) -> bool {
        if self.node(to).is_none() {
            return false;
        }
        match self.node_mut(from) {
            Some(node) => node.remove_arc_to(to),
            None => false,
        }
    }

    /// Returns the arc `from -> to`, or `None` if either slot is vacant or
    /// no such arc exists. Scans the source node's arc list.
    pub fn arc_between(&self, from: NodeId, to: NodeId) -> Option<&Arc> {
        self.node(to)?;
        self.node(from)?.arc_to(to)
    }

    /// Clears every node's search state: marks, g- and h-costs and
    /// back-pointers. Idempotent; must be called between independent
    /// searches. Heuristics set by
    /// [`set_heuristics`](SlotGraph::set_heuristics) become unset and have
    /// to be recomputed.
    pub fn reset(&mut self) {
        for node in self.slots.iter_mut().flatten() {
            node.clear_search_state();
        }
    }

    /// Validates that slot `u` is occupied
    pub(crate) fn check_occupied(&self, u: NodeId) -> Result<(), GraphError> {
        if u as usize >= self.slots.len() {
            return Err(GraphError::SlotOutOfRange(u));
        }
        if self.slots[u as usize].is_none() {
            return Err(GraphError::MissingEndpoint(u));
        }
        Ok(())
    }

    /// Internal accessor for slots known to be occupied.
    /// ** Panics if the slot is vacant **
    pub(crate) fn node_ref(&self, u: NodeId) -> &Node<D> {
        self.slots[u as usize]
            .as_ref()
            .expect("slot must hold a live node")
    }

    /// Mutable internal accessor for slots known to be occupied.
    /// ** Panics if the slot is vacant **
    pub(crate) fn node_ref_mut(&mut self, u: NodeId) -> &mut Node<D> {
        self.slots[u as usize]
            .as_mut()
            .expect("slot must hold a live node")
    }
}
