/*!
# IO

Utilities for seeding a [`SlotGraph`] from the line-oriented text formats
and for exporting it for external visualization.

## Input Formats

- **Node table**: one node per line, whitespace-delimited
  `label x-offset y-offset`. Slots are assigned sequentially from `0` in
  file order; the label becomes the node payload and the offsets its
  position.
- **Arc list**: whitespace-delimited `from to weight` triples, one arc per
  line, addressing nodes by their slot index. An optional first line
  holding the single word `undirected` switches every insertion to the
  undirected variant (two independent arcs per line).

Blank lines are skipped in both formats. Parse failures are reported as
[`std::io::Error`] with [`ErrorKind::InvalidData`].

## Output Formats

- **Dot**: the [DOT language](https://graphviz.org/doc/info/lang.html) of
  [GraphViz](https://graphviz.org/), with node labels and arc weights. Only
  basic functionality, enough to eyeball a graph and its weights.

The graph core never initiates I/O itself; everything in this module runs
over caller-supplied readers and writers, with `*_file` convenience
wrappers.
*/

use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Result, Write},
    path::Path,
};

use fxhash::FxHashMap;

use crate::{
    arc::Weight,
    geom::Point,
    graph::SlotGraph,
    node::{NodeId, NumNodes},
};

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

/// One record of the node table: the payload label plus the layout offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub label: String,
    pub position: Point,
}

/// Reads a node table from the given reader.
///
/// Records are returned in file order; their vector index is the slot the
/// node is assigned to.
pub fn try_read_node_table<R: BufRead>(reader: R) -> Result<Vec<NodeRecord>> {
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        let Some(label) = parts.next() else {
            continue;
        };
        let x: f32 = parse_next_value!(parts, "x-offset");
        let y: f32 = parse_next_value!(parts, "y-offset");

        records.push(NodeRecord {
            label: label.to_string(),
            position: Point::new(x, y),
        });
    }

    Ok(records)
}

/// The parsed arc list: the directedness marker plus the arc triples in
/// file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcList {
    pub directed: bool,
    pub arcs: Vec<(NodeId, NodeId, Weight)>,
}

/// Reads an arc list from the given reader.
///
/// If the first non-blank line is the single word `undirected`, the whole
/// list is undirected; otherwise every line (the first included) is parsed
/// as a `from to weight` triple.
pub fn try_read_arc_list<R: BufRead>(reader: R) -> Result<ArcList> {
    let mut directed = true;
    let mut arcs = Vec::new();
    let mut first_record = true;

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        let Some(head) = parts.next() else {
            continue;
        };

        if first_record && head == "undirected" {
            directed = false;
            first_record = false;
            continue;
        }
        first_record = false;

        let from: NodeId = head.parse().map_err(|_| {
            io_error!(
                ErrorKind::InvalidData,
                "Invalid value found. Cannot parse source slot."
            )
        })?;
        let to: NodeId = parse_next_value!(parts, "target slot");
        let weight: Weight = parse_next_value!(parts, "arc weight");

        arcs.push((from, to, weight));
    }

    Ok(ArcList { directed, arcs })
}

impl SlotGraph<String> {
    /// Builds a graph from a node table and an arc list.
    ///
    /// The graph capacity equals the number of node records; arc slots that
    /// do not address a parsed node (and duplicate arcs) are reported as
    /// `InvalidData`.
    pub fn try_read_parts<R1, R2>(nodes: R1, arcs: R2) -> Result<Self>
    where
        R1: BufRead,
        R2: BufRead,
    {
        let records = try_read_node_table(nodes)?;
        raise_error_unless!(
            !records.is_empty(),
            ErrorKind::InvalidData,
            "Node table is empty."
        );

        let mut graph = SlotGraph::new(records.len() as NumNodes);
        for (slot, record) in records.into_iter().enumerate() {
            graph
                .try_add_node(slot as NodeId, record.label, record.position)
                .expect("slots are assigned sequentially");
        }

        let arc_list = try_read_arc_list(arcs)?;
        for (from, to, weight) in arc_list.arcs {
            let inserted = if arc_list.directed {
                graph.try_add_arc(from, to, weight)
            } else {
                graph.try_add_arc_undirected(from, to, weight)
            };
            inserted.map_err(|e| io_error!(ErrorKind::InvalidData, e))?;
        }

        tracing::debug!(
            nodes = graph.number_of_nodes(),
            directed = arc_list.directed,
            "graph loaded"
        );
        Ok(graph)
    }

    /// Builds a graph from a node-table file and an arc-list file
    pub fn try_read_files<P1, P2>(nodes: P1, arcs: P2) -> Result<Self>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        Self::try_read_parts(
            BufReader::new(File::open(nodes)?),
            BufReader::new(File::open(arcs)?),
        )
    }

    /// Returns a map from payload label to slot index, for callers that
    /// address nodes by name. Later slots win on duplicate labels.
    pub fn label_index(&self) -> FxHashMap<String, NodeId> {
        self.nodes()
            .map(|node| (node.data().clone(), node.id()))
            .collect()
    }
}

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Prefix of a node (default: 'u')
    prefix: String,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            prefix: "u".to_string(),
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix of a node (`u` by default)
    pub fn node_prefix<S>(mut self, prefix: S) -> DotWriter
    where
        S: Into<String>,
    {
        self.prefix = prefix.into();
        self
    }

    /// Writes the graph to `writer` in the DOT language: one labelled node
    /// statement per live slot, one weighted edge statement per arc.
    ///
    /// If `directed` is *false*, the graph is emitted with undirected edge
    /// operators and only the normalized direction (`source <= target`) of
    /// each arc pair is drawn.
    pub fn try_write_graph<D, W>(
        &self,
        graph: &SlotGraph<D>,
        directed: bool,
        writer: &mut W,
    ) -> Result<()>
    where
        D: Display,
        W: Write,
    {
        let (graph_kind, edge_op) = if directed {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };
        writeln!(writer, "{graph_kind} {{")?;

        for node in graph.nodes() {
            writeln!(
                writer,
                "  {}{} [label=\"{}\"];",
                self.prefix,
                node.id(),
                node.data()
            )?;
        }

        for node in graph.nodes() {
            for arc in node.arcs() {
                if !directed && arc.target() < node.id() {
                    continue;
                }
                writeln!(
                    writer,
                    "  {}{}{edge_op}{}{} [label={}];",
                    self.prefix,
                    node.id(),
                    self.prefix,
                    arc.target(),
                    arc.weight()
                )?;
            }
        }

        writeln!(writer, "}}")
    }

    /// Writes the graph to a file in the DOT language
    pub fn try_write_graph_file<D, P>(
        &self,
        graph: &SlotGraph<D>,
        directed: bool,
        path: P,
    ) -> Result<()>
    where
        D: Display,
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, directed, &mut BufWriter::new(File::create(path)?))
    }
}
