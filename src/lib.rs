/*!
`wgraphs` is a graph data structure & search library designed for graphs that are
- **w**eighted : every arc carries a non-negative integer weight
- **slot-addressed** : nodes live at caller-chosen integer indices in a fixed-capacity slot array
- **search-oriented** : every node carries the bookkeeping (mark, g-cost, h-cost, back-pointer) that the classical path searches need

# Representation

We represent **slots** as `u32` in the range `0..capacity` where `capacity` is fixed at
construction. Each slot is either vacant or holds one owned node; a node owns its payload,
its 2D position and its ordered list of outgoing **arcs**, each a `(target, weight)` pair.
Undirected connections are simply two independent arcs.

# Searches

Five classical searches are implemented as methods on [`graph::SlotGraph`]:

- [`depth_first`](graph::SlotGraph::depth_first): recursive pre-order traversal with a visit callback,
- [`breadth_first`](graph::SlotGraph::breadth_first): queue-based traversal with a visit callback,
- [`breadth_first_path`](graph::SlotGraph::breadth_first_path): minimum-edge-count path between two nodes,
- [`uniform_cost`](graph::SlotGraph::uniform_cost): cheapest path by accumulated weight (Dijkstra),
- [`a_star`](graph::SlotGraph::a_star): cheapest path guided by Euclidean heuristics
  ([`set_heuristics`](graph::SlotGraph::set_heuristics)).

Searches mutate per-node state in place and take `&mut self`; call
[`reset`](graph::SlotGraph::reset) between independent searches.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes the graph, node, arc and geometry types,
- [`algo`] holds the search implementations and the [`SearchPath`](algo::SearchPath) result type,
- [`io`] reads the node-table / arc-list seed formats and writes DOT output,
- [`graph`] exposes the mutation surface and [`GraphError`](graph::GraphError).

```
use wgraphs::prelude::*;

let mut graph = SlotGraph::new(3);
graph.add_node(0, "s", Point::new(0.0, 0.0));
graph.add_node(1, "m", Point::new(1.0, 0.0));
graph.add_node(2, "t", Point::new(2.0, 0.0));
graph.add_arc(0, 1, 1);
graph.add_arc(1, 2, 1);
graph.add_arc(0, 2, 5);

let path = graph.uniform_cost(0, 2).unwrap();
assert_eq!(path.nodes, vec![0, 1, 2]);
assert_eq!(path.cost, 2);
```

# When to use

You should only use this library if the following apply:
- Your graphs are small enough for a fixed slot array chosen up front
- Arc weights are non-negative
- You want the search bookkeeping (costs, back-pointers, marks) to stay
  inspectable on the nodes, e.g. for a visualization layer

For large graphs or a richer algorithm portfolio, check out
[petgraph](https://crates.io/crates/petgraph).
*/

pub mod algo;
pub mod arc;
pub mod geom;
pub mod graph;
pub mod io;
pub mod node;

/// `wgraphs::prelude` includes the graph, node, arc and geometry types as well as the search-path result.
pub mod prelude {
    pub use super::{algo::SearchPath, arc::*, geom::*, graph::*, node::*};
}
