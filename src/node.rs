/*!
# Node Representation

We choose `NodeId = u32` for slot indices: graphs in this crate have a small
fixed capacity chosen up front, and `u32` keeps per-arc storage compact.

A [`Node`] bundles three kinds of state:
- the caller-owned payload and position,
- the ordered list of outgoing arcs,
- per-search bookkeeping (mark, g-cost, h-cost, back-pointer) that is only
  meaningful between the start of a search and the next
  [`reset`](crate::graph::SlotGraph::reset).

The g- and h-costs use independent `Option` sentinels: "no path found yet"
(`g == None`) and "heuristic not yet computed" (`h == None`) are distinct
conditions and must never be conflated.
*/

use smallvec::SmallVec;

use crate::{
    arc::{Arc, Cost, Weight},
    geom::Point,
};

/// Slot indices can be any unsigned integer from `0` to the graph capacity
pub type NodeId = u32;

/// Node counts and capacities share the index type
pub type NumNodes = NodeId;

/// Arc lists stay inline for the first few arcs; most nodes in the graphs
/// this crate targets have low out-degree.
pub(crate) type ArcList = SmallVec<[Arc; 4]>;

/// A graph vertex: payload, position, outgoing arcs and search bookkeeping.
pub struct Node<D> {
    id: NodeId,
    data: D,
    position: Point,
    arcs: ArcList,
    marked: bool,
    g: Option<Cost>,
    h: Option<Cost>,
    prev: Option<NodeId>,
}

impl<D> Node<D> {
    pub(crate) fn new(id: NodeId, data: D, position: Point) -> Self {
        Self {
            id,
            data,
            position,
            arcs: ArcList::new(),
            marked: false,
            g: None,
            h: None,
            prev: None,
        }
    }

    /// Returns the slot index this node lives at. Stable for the node's lifetime.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns a reference to the payload
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Returns a mutable reference to the payload
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Replaces the payload
    pub fn set_data(&mut self, data: D) {
        self.data = data;
    }

    /// Returns the node position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Updates the node position. Positions are owned by the layout/rendering
    /// collaborator; heuristics computed from an older position stay as they
    /// are until [`set_heuristics`](crate::graph::SlotGraph::set_heuristics)
    /// runs again.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Returns the outgoing arcs in insertion order
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Returns *true* if the node has been discovered by the current search
    pub fn marked(&self) -> bool {
        self.marked
    }

    /// Returns the accumulated path cost from the current search's start
    /// node, or `None` if the node has not been relaxed yet
    pub fn g_cost(&self) -> Option<Cost> {
        self.g
    }

    /// Returns the heuristic estimate to the active destination, or `None`
    /// if [`set_heuristics`](crate::graph::SlotGraph::set_heuristics) has
    /// not run since the last reset
    pub fn h_cost(&self) -> Option<Cost> {
        self.h
    }

    /// Returns f = g + h if both parts are set
    pub fn f_cost(&self) -> Option<Cost> {
        Some(self.g? + self.h?)
    }

    /// Returns the predecessor recorded by the current search, if any
    pub fn previous(&self) -> Option<NodeId> {
        self.prev
    }

    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    pub(crate) fn set_g(&mut self, g: Cost) {
        self.g = Some(g);
    }

    pub(crate) fn set_h(&mut self, h: Cost) {
        self.h = Some(h);
    }

    pub(crate) fn set_previous(&mut self, prev: NodeId) {
        self.prev = Some(prev);
    }

    /// Returns the node to its pre-search state
    pub(crate) fn clear_search_state(&mut self) {
        self.marked = false;
        self.g = None;
        self.h = None;
        self.prev = None;
    }

    /// Linear scan for the arc pointing at `target`
    pub(crate) fn arc_to(&self, target: NodeId) -> Option<&Arc> {
        self.arcs.iter().find(|a| a.target() == target)
    }

    /// Appends an arc without a duplicate check
    pub(crate) fn push_arc(&mut self, target: NodeId, weight: Weight) {
        self.arcs.push(Arc::new(target, weight));
    }

    /// Removes the first arc pointing at `target`.
    /// Returns *true* exactly if an arc was removed.
    pub(crate) fn remove_arc_to(&mut self, target: NodeId) -> bool {
        match self.arcs.iter().position(|a| a.target() == target) {
            Some(idx) => {
                self.arcs.remove(idx);
                true
            }
            None => false,
        }
    }
}
