/*!
Unweighted traversals: depth-first, breadth-first, and the breadth-first
path search.

Traversal order is a function of arc insertion order alone; weights are
ignored here. The mark discipline differs between the two walks: depth-first
marks a node when it is visited, breadth-first marks at enqueue time so that
every node enters the queue at most once.
*/

use std::collections::VecDeque;

use itertools::Itertools;

use crate::{
    algo::{backtrack, SearchPath},
    arc::Cost,
    graph::SlotGraph,
    node::{Node, NodeId},
};

impl<D> SlotGraph<D> {
    /// Visits every node reachable from `start` in pre-order: the callback
    /// runs on a node before its unmarked arc targets are descended into, in
    /// arc-list order. Each reachable node is visited exactly once.
    ///
    /// A vacant `start` slot is a no-op. Run [`reset`](SlotGraph::reset)
    /// before reusing the graph for another search.
    pub fn depth_first<F>(&mut self, start: NodeId, mut visit: F)
    where
        F: FnMut(&Node<D>),
    {
        if self.node(start).is_none() {
            tracing::debug!(start, "depth-first start slot is vacant");
            return;
        }

        self.depth_first_visit(start, &mut visit);
    }

    fn depth_first_visit<F>(&mut self, u: NodeId, visit: &mut F)
    where
        F: FnMut(&Node<D>),
    {
        visit(self.node_ref(u));
        self.node_ref_mut(u).set_marked(true);

        let targets = self.node_ref(u).arcs().iter().map(|a| a.target()).collect_vec();
        for target in targets {
            if !self.node_ref(target).marked() {
                self.depth_first_visit(target, visit);
            }
        }
    }

    /// Visits every node reachable from `start` in breadth-first order.
    ///
    /// Nodes are marked when enqueued and visited when dequeued, so each
    /// reachable node is visited exactly once. A vacant `start` slot is a
    /// no-op.
    pub fn breadth_first<F>(&mut self, start: NodeId, mut visit: F)
    where
        F: FnMut(&Node<D>),
    {
        if self.node(start).is_none() {
            tracing::debug!(start, "breadth-first start slot is vacant");
            return;
        }

        let mut queue = VecDeque::new();
        self.node_ref_mut(start).set_marked(true);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            visit(self.node_ref(u));

            let targets = self.node_ref(u).arcs().iter().map(|a| a.target()).collect_vec();
            for target in targets {
                if !self.node_ref(target).marked() {
                    self.node_ref_mut(target).set_marked(true);
                    queue.push_back(target);
                }
            }
        }
    }

    /// Finds a path from `start` to `dest` with the minimum number of edges,
    /// ignoring weights.
    ///
    /// Uses the breadth-first queue discipline and records each node's
    /// back-pointer at first discovery; the search stops the moment `dest`
    /// is discovered. Since BFS discovers nodes in non-decreasing hop-count
    /// order, the reconstructed path has as few edges as any path between
    /// the two nodes.
    ///
    /// Returns `None` (and logs a diagnostic) if `dest` is unreachable or
    /// either slot is vacant. The returned [`SearchPath::cost`] is the hop
    /// count.
    pub fn breadth_first_path(&mut self, start: NodeId, dest: NodeId) -> Option<SearchPath> {
        if self.node(start).is_none() || self.node(dest).is_none() {
            tracing::debug!(start, dest, "breadth-first path endpoints must be occupied");
            return None;
        }

        if start == dest {
            return Some(SearchPath {
                nodes: vec![start],
                cost: 0,
            });
        }

        let mut queue = VecDeque::new();
        self.node_ref_mut(start).set_marked(true);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let targets = self.node_ref(u).arcs().iter().map(|a| a.target()).collect_vec();
            for target in targets {
                if self.node_ref(target).marked() {
                    continue;
                }

                let child = self.node_ref_mut(target);
                child.set_marked(true);
                child.set_previous(u);

                if target == dest {
                    let nodes = backtrack(self, dest);
                    let cost = (nodes.len() - 1) as Cost;
                    return Some(SearchPath { nodes, cost });
                }

                queue.push_back(target);
            }
        }

        tracing::debug!(start, dest, "no path found");
        None
    }
}
