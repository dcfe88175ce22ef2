/*!
Weighted searches: uniform-cost (Dijkstra) and A*.

Both share one priority-queue discipline. The heap holds `(key, node)`
entries ordered by ascending key: accumulated g-cost for uniform-cost
search, f = g + h for A*. A node may be pushed more than once as its cost
improves; instead of a decrease-key operation we discard stale entries
explicitly on pop: an entry whose key no longer matches the node's current
stored cost is a no-op. The stale-entry check doubles as the closed set:
with non-negative weights a popped node's g-cost cannot improve again, and
should a rounding-inconsistent heuristic ever improve a node after its
first expansion, the relaxation re-queues it with a current key.

Requires non-negative weights, which [`Weight`](crate::arc::Weight) grants
by type.
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use itertools::Itertools;

use crate::{
    algo::{backtrack, SearchPath},
    arc::{Cost, Weight},
    graph::{GraphError, SlotGraph},
    node::NodeId,
};

/// A heap entry: candidate key for one node at push time.
///
/// `Ord` is reversed so that `BinaryHeap` pops the smallest key first; ties
/// break on the smaller slot index, keeping expansion order deterministic.
#[derive(Copy, Clone, PartialEq, Eq)]
struct QueueEntry {
    key: Cost,
    node: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> SlotGraph<D> {
    /// Stores on every occupied node the rounded Euclidean distance from its
    /// position to `dest`'s position as the node's h-cost.
    ///
    /// Must run before [`a_star`](SlotGraph::a_star) and again whenever the
    /// destination changes; [`reset`](SlotGraph::reset) invalidates the
    /// stored estimates.
    pub fn set_heuristics(&mut self, dest: NodeId) -> Result<(), GraphError> {
        self.check_occupied(dest)?;
        let dest_position = self.node_ref(dest).position();

        for u in 0..self.capacity() {
            if let Some(node) = self.node_mut(u) {
                let h = node.position().rounded_distance_to(dest_position);
                node.set_h(h);
            }
        }

        Ok(())
    }

    /// Finds the cheapest path from `start` to `dest` by accumulated arc
    /// weight, expanding nodes in ascending g-cost order.
    ///
    /// Returns `None` (and logs a diagnostic) if the frontier is exhausted
    /// without reaching `dest`, or if either slot is vacant. Run
    /// [`reset`](SlotGraph::reset) between independent searches.
    pub fn uniform_cost(&mut self, start: NodeId, dest: NodeId) -> Option<SearchPath> {
        self.cheapest_path(start, dest, false)
    }

    /// Finds the cheapest path from `start` to `dest`, expanding nodes in
    /// ascending f = g + h order.
    ///
    /// With all heuristics zero this degenerates to
    /// [`uniform_cost`](SlotGraph::uniform_cost); with admissible heuristics
    /// it returns the same cost while expanding fewer nodes.
    ///
    /// ** Panics if a reached node has no h-cost, i.e. if
    /// [`set_heuristics`](SlotGraph::set_heuristics) has not run since the
    /// last reset **
    pub fn a_star(&mut self, start: NodeId, dest: NodeId) -> Option<SearchPath> {
        self.cheapest_path(start, dest, true)
    }

    fn cheapest_path(&mut self, start: NodeId, dest: NodeId, guided: bool) -> Option<SearchPath> {
        if self.node(start).is_none() || self.node(dest).is_none() {
            tracing::debug!(start, dest, "search endpoints must be occupied");
            return None;
        }

        let mut heap = BinaryHeap::new();

        let seed = self.node_ref_mut(start);
        seed.set_g(0);
        seed.set_marked(true);
        heap.push(QueueEntry {
            key: self.search_key(start, guided),
            node: start,
        });

        while let Some(QueueEntry { key, node: u }) = heap.pop() {
            // Stale entry: the node was improved (and re-pushed) after this
            // entry was queued.
            if self.search_key(u, guided) != key {
                continue;
            }

            if u == dest {
                let cost = self.node_ref(u).g_cost().expect("popped node has a g-cost");
                let nodes = backtrack(self, dest);
                tracing::debug!(start, dest, cost, hops = nodes.len() - 1, "path found");
                return Some(SearchPath { nodes, cost });
            }

            let g_u = self.node_ref(u).g_cost().expect("popped node has a g-cost");
            let arcs = self
                .node_ref(u)
                .arcs()
                .iter()
                .map(|a| (a.target(), a.weight()))
                .collect_vec();

            for (target, weight) in arcs {
                let candidate = g_u + Cost::from(weight);

                let child = self.node_ref_mut(target);
                if child.g_cost().map_or(true, |g| candidate < g) {
                    child.set_g(candidate);
                    child.set_previous(u);
                    child.set_marked(true);
                    heap.push(QueueEntry {
                        key: self.search_key(target, guided),
                        node: target,
                    });
                }
            }
        }

        tracing::debug!(start, dest, "no path found");
        None
    }

    /// The priority key of a node's current cost: g for uniform-cost
    /// search, f = g + h for A*.
    fn search_key(&self, u: NodeId, guided: bool) -> Cost {
        let node = self.node_ref(u);
        if guided {
            node.f_cost().expect("set_heuristics must run before a_star")
        } else {
            node.g_cost().expect("queued node has a g-cost")
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::geom::Point;

    fn graph_with_nodes(n: u32) -> SlotGraph<u32> {
        let mut graph = SlotGraph::new(n);
        for u in 0..n {
            graph.add_node(u, u, Point::default());
        }
        graph
    }

    /// All-pairs shortest-path oracle by repeated relaxation
    fn floyd_warshall(graph: &SlotGraph<u32>) -> Vec<Vec<Option<Cost>>> {
        let n = graph.capacity() as usize;
        let mut dist = vec![vec![None; n]; n];

        for u in 0..n {
            dist[u][u] = Some(0);
        }
        for node in graph.nodes() {
            for arc in node.arcs() {
                let w = Cost::from(arc.weight());
                let entry = &mut dist[node.id() as usize][arc.target() as usize];
                if entry.map_or(true, |d| w < d) {
                    *entry = Some(w);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(a), Some(b)) = (dist[i][k], dist[k][j]) {
                        if dist[i][j].map_or(true, |d| a + b < d) {
                            dist[i][j] = Some(a + b);
                        }
                    }
                }
            }
        }

        dist
    }

    fn random_graph(rng: &mut impl Rng, n: u32) -> SlotGraph<u32> {
        let mut graph = graph_with_nodes(n);
        for (u, v) in (0..n).cartesian_product(0..n) {
            if u != v && rng.random_bool(0.3) {
                graph.add_arc(u, v, rng.random_range(1..=20));
            }
        }
        graph
    }

    fn assert_valid_path(graph: &SlotGraph<u32>, path: &SearchPath) {
        let mut total: Cost = 0;
        for (u, v) in path.nodes.iter().tuple_windows() {
            let arc = graph.arc_between(*u, *v).expect("path follows arcs");
            total += Cost::from(arc.weight());
        }
        assert_eq!(total, path.cost);
    }

    #[test]
    fn uniform_cost_prefers_cheap_detour() {
        let mut graph = graph_with_nodes(4);
        graph.add_arc(0, 3, 10);
        graph.add_arc(0, 1, 2);
        graph.add_arc(1, 2, 2);
        graph.add_arc(2, 3, 2);

        let path = graph.uniform_cost(0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(path.cost, 6);
    }

    #[test]
    fn uniform_cost_relaxes_already_discovered_nodes() {
        // node 2 is discovered via the expensive arc first, then improved
        let mut graph = graph_with_nodes(4);
        graph.add_arc(0, 2, 10);
        graph.add_arc(0, 1, 1);
        graph.add_arc(1, 2, 1);
        graph.add_arc(2, 3, 1);

        let path = graph.uniform_cost(0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(path.cost, 3);
    }

    #[test]
    fn uniform_cost_matches_oracle_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [4u32, 6, 8, 10] {
            for _ in 0..20 {
                let mut graph = random_graph(rng, n);
                let oracle = floyd_warshall(&graph);

                for (s, t) in (0..n).cartesian_product(0..n) {
                    let found = graph.uniform_cost(s, t);
                    match oracle[s as usize][t as usize] {
                        Some(best) => {
                            let path = found.expect("oracle says a path exists");
                            assert_eq!(path.cost, best);
                            assert_eq!(path.start(), s);
                            assert_eq!(path.dest(), t);
                            assert_valid_path(&graph, &path);
                        }
                        None => assert_eq!(found, None),
                    }
                    graph.reset();
                }
            }
        }
    }

    #[test]
    fn a_star_equals_uniform_cost_with_zero_heuristics() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for _ in 0..30 {
            // all nodes share one position, so every heuristic rounds to 0
            let mut graph = random_graph(rng, 8);

            for (s, t) in (0..8).cartesian_product(0..8) {
                let ucs = graph.uniform_cost(s, t);
                graph.reset();

                graph.set_heuristics(t).unwrap();
                assert!(graph
                    .nodes()
                    .all(|node| node.h_cost() == Some(0)));
                let astar = graph.a_star(s, t);
                graph.reset();

                match (ucs, astar) {
                    (Some(a), Some(b)) => {
                        assert_eq!(a.cost, b.cost);
                        assert_eq!(a.nodes, b.nodes);
                    }
                    (a, b) => assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn a_star_chain_with_zero_heuristic() {
        // directed chain 0 -> 1 -> 2 -> 3 -> 4, unit weights
        let mut graph = graph_with_nodes(5);
        for u in 0..4 {
            graph.add_arc(u, u + 1, 1);
        }

        graph.set_heuristics(4).unwrap();
        let path = graph.a_star(0, 4).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
        assert_eq!(path.cost, 4);
    }

    #[test]
    fn a_star_with_euclidean_heuristics_stays_optimal() {
        // 4x4 grid with unit positions; arc weights equal the (unit)
        // distance, so the heuristic is admissible
        let side = 4u32;
        let mut graph = SlotGraph::new(side * side);
        for y in 0..side {
            for x in 0..side {
                graph.add_node(y * side + x, 0u32, Point::new(x as f32, y as f32));
            }
        }
        for y in 0..side {
            for x in 0..side {
                let u = y * side + x;
                if x + 1 < side {
                    graph.try_add_arc_undirected(u, u + 1, 1).unwrap();
                }
                if y + 1 < side {
                    graph.try_add_arc_undirected(u, u + side, 1).unwrap();
                }
            }
        }

        let ucs = graph.uniform_cost(0, side * side - 1).unwrap();
        graph.reset();

        graph.set_heuristics(side * side - 1).unwrap();
        let astar = graph.a_star(0, side * side - 1).unwrap();

        assert_eq!(astar.cost, ucs.cost);
        assert_eq!(astar.cost, Cost::from(2 * (side - 1)));
        assert_valid_path(&graph, &astar);
    }

    #[test]
    fn heuristics_are_rounded_euclidean_distances() {
        let mut graph = SlotGraph::new(3);
        graph.add_node(0, 0u32, Point::new(0.0, 0.0));
        graph.add_node(1, 0u32, Point::new(3.0, 4.0));
        graph.add_node(2, 0u32, Point::new(1.0, 1.0));

        graph.set_heuristics(0).unwrap();
        assert_eq!(graph.node(0).unwrap().h_cost(), Some(0));
        assert_eq!(graph.node(1).unwrap().h_cost(), Some(5));
        assert_eq!(graph.node(2).unwrap().h_cost(), Some(1)); // sqrt(2) rounds to 1
    }

    #[test]
    fn set_heuristics_requires_live_destination() {
        let mut graph = SlotGraph::new(2);
        graph.add_node(0, 0u32, Point::default());

        assert_eq!(graph.set_heuristics(1), Err(GraphError::MissingEndpoint(1)));
        assert_eq!(graph.set_heuristics(5), Err(GraphError::SlotOutOfRange(5)));
    }

    #[test]
    fn repeated_search_after_reset_is_identical() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        let mut graph = random_graph(rng, 10);

        let first = graph.uniform_cost(0, 9);
        graph.reset();
        let second = graph.uniform_cost(0, 9);

        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_destination_yields_none() {
        // two components, no arc path between them
        let mut graph = graph_with_nodes(4);
        graph.try_add_arc_undirected(0, 1, 1).unwrap();
        graph.try_add_arc_undirected(2, 3, 1).unwrap();

        assert_eq!(graph.uniform_cost(0, 2), None);
        graph.reset();

        graph.set_heuristics(2).unwrap();
        assert_eq!(graph.a_star(0, 2), None);
        graph.reset();

        assert_eq!(graph.breadth_first_path(0, 2), None);
    }

    #[test]
    fn search_on_vacant_slots_yields_none() {
        let mut graph = SlotGraph::new(3);
        graph.add_node(0, 0u32, Point::default());

        assert_eq!(graph.uniform_cost(0, 1), None);
        assert_eq!(graph.uniform_cost(1, 0), None);
        assert_eq!(graph.uniform_cost(0, 7), None);
    }

    #[test]
    fn start_equals_dest_is_a_trivial_path() {
        let mut graph = graph_with_nodes(2);
        graph.add_arc(0, 1, 1);

        let path = graph.uniform_cost(0, 0).unwrap();
        assert_eq!(path.nodes, vec![0]);
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn searches_mark_discovered_nodes() {
        let mut graph = graph_with_nodes(3);
        graph.add_arc(0, 1, 1);
        graph.add_arc(1, 2, 1);

        graph.uniform_cost(0, 2).unwrap();
        assert!(graph.nodes().all(|node| node.marked()));
    }
}
