// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Network Topology
//!
//! The directed, capacity-bearing graph a TSN fabric is evaluated against.
//! `Topology` is the immutable, index-addressed representation consumed by the
//! scoring engine; `TopologyBuilder` is the mutable construction side.
//!
//! ## Motivation
//!
//! Candidate scoring walks edges in tight loops, so edges live in a flat
//! vector addressed by `EdgeIndex` and per-edge state elsewhere (allocation
//! arenas) can mirror that layout. Full-duplex Ethernet links are modeled as
//! two independent directed edges.
//!
//! ## Highlights
//!
//! - `NodeKind` distinguishes end systems (traffic endpoints) from bridges.
//! - `TopologyBuilder` validates eagerly: endpoint bounds, positive finite
//!   capacity, no self-loops, no duplicate directed edges.
//! - `Topology` offers O(1) edge lookup by `(source, target)` and per-node
//!   outgoing adjacency.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_model::topology::TopologyBuilder;
//!
//! let mut builder = TopologyBuilder::new();
//! let talker = builder.add_end_system();
//! let bridge = builder.add_bridge();
//! let listener = builder.add_end_system();
//! builder.add_edge(talker, bridge, 100.0);
//! builder.add_edge(bridge, listener, 100.0);
//!
//! let topology = builder.build();
//! assert_eq!(topology.num_nodes(), 3);
//! assert_eq!(topology.num_edges(), 2);
//! assert!(topology.edge_between(talker, bridge).is_some());
//! ```

use crate::index::{EdgeIndex, NodeIndex};
use rustc_hash::FxHashMap;

/// The role of a topology node.
///
/// End systems source and sink traffic; bridges only forward it. The scoring
/// engine itself is indifferent to the kind, but loaders and display code use
/// it, and flow endpoints are conventionally end systems.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
    /// A host that sources or sinks traffic flows.
    EndSystem,
    /// A TSN switch that forwards traffic.
    Bridge,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::EndSystem => write!(f, "EndSystem"),
            NodeKind::Bridge => write!(f, "Bridge"),
        }
    }
}

/// A directed link between two nodes with a fixed raw capacity in Mbps.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Edge {
    source: NodeIndex,
    target: NodeIndex,
    capacity_mbps: f64,
}

impl Edge {
    /// Returns the node this edge departs from.
    #[inline(always)]
    pub const fn source(&self) -> NodeIndex {
        self.source
    }

    /// Returns the node this edge arrives at.
    #[inline(always)]
    pub const fn target(&self) -> NodeIndex {
        self.target
    }

    /// Returns the raw link capacity in Mbps.
    #[inline(always)]
    pub const fn capacity_mbps(&self) -> f64 {
        self.capacity_mbps
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({} Mbps)",
            self.source.get(),
            self.target.get(),
            self.capacity_mbps
        )
    }
}

/// An immutable directed graph of nodes and capacity-bearing edges.
///
/// Built once via [`TopologyBuilder`] and shared read-only for the duration of
/// a run. All lookups are index-based; none allocate.
#[derive(Clone, Debug)]
pub struct Topology {
    nodes: Vec<NodeKind>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeIndex>>,
    edge_lookup: FxHashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}

impl Topology {
    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of directed edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the kind of the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node_index` is not in `0..num_nodes()`.
    #[inline]
    pub fn node_kind(&self, node_index: NodeIndex) -> NodeKind {
        let index = node_index.get();
        debug_assert!(
            index < self.num_nodes(),
            "called `Topology::node_kind` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            index
        );

        self.nodes[index]
    }

    /// Returns the edge at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `edge_index` is not in `0..num_edges()`.
    #[inline]
    pub fn edge(&self, edge_index: EdgeIndex) -> &Edge {
        let index = edge_index.get();
        debug_assert!(
            index < self.num_edges(),
            "called `Topology::edge` with edge index out of bounds: the len is {} but the index is {}",
            self.num_edges(),
            index
        );

        &self.edges[index]
    }

    /// Returns the raw capacity in Mbps of the given edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge_index` is not in `0..num_edges()`.
    #[inline(always)]
    pub fn capacity_mbps(&self, edge_index: EdgeIndex) -> f64 {
        self.edge(edge_index).capacity_mbps()
    }

    /// Returns all edges as a slice, addressed by `EdgeIndex`.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up the directed edge from `source` to `target`, if one exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_model::topology::TopologyBuilder;
    ///
    /// let mut builder = TopologyBuilder::new();
    /// let a = builder.add_bridge();
    /// let b = builder.add_bridge();
    /// let forward = builder.add_edge(a, b, 1000.0);
    ///
    /// let topology = builder.build();
    /// assert_eq!(topology.edge_between(a, b), Some(forward));
    /// assert_eq!(topology.edge_between(b, a), None);
    /// ```
    #[inline]
    pub fn edge_between(&self, source: NodeIndex, target: NodeIndex) -> Option<EdgeIndex> {
        self.edge_lookup.get(&(source, target)).copied()
    }

    /// Returns the edges departing from the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node_index` is not in `0..num_nodes()`.
    #[inline]
    pub fn outgoing_edges(&self, node_index: NodeIndex) -> &[EdgeIndex] {
        let index = node_index.get();
        debug_assert!(
            index < self.num_nodes(),
            "called `Topology::outgoing_edges` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            index
        );

        &self.outgoing[index]
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Topology(nodes: {}, edges: {})",
            self.num_nodes(),
            self.num_edges()
        )
    }
}

/// A mutable builder for [`Topology`].
///
/// Nodes and edges are appended and addressed by the indices the builder
/// returns. All validation happens here so the built topology is always
/// internally consistent.
///
/// # Examples
///
/// ```rust
/// # use trellis_model::topology::TopologyBuilder;
///
/// let mut builder = TopologyBuilder::new();
/// let a = builder.add_end_system();
/// let b = builder.add_bridge();
/// let (ab, ba) = builder.add_duplex_link(a, b, 100.0);
///
/// let topology = builder.build();
/// assert_eq!(topology.edge(ab).source(), a);
/// assert_eq!(topology.edge(ba).source(), b);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TopologyBuilder {
    nodes: Vec<NodeKind>,
    edges: Vec<Edge>,
    edge_lookup: FxHashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}

impl TopologyBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes added so far.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges added so far.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node of the given kind and returns its index.
    #[inline]
    pub fn add_node(&mut self, kind: NodeKind) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(kind);
        index
    }

    /// Adds an end-system node and returns its index.
    #[inline]
    pub fn add_end_system(&mut self) -> NodeIndex {
        self.add_node(NodeKind::EndSystem)
    }

    /// Adds a bridge node and returns its index.
    #[inline]
    pub fn add_bridge(&mut self) -> NodeIndex {
        self.add_node(NodeKind::Bridge)
    }

    /// Adds a directed edge from `source` to `target` with the given raw
    /// capacity in Mbps and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of bounds, if `source == target`, if
    /// the capacity is not a positive finite number, or if the directed edge
    /// already exists.
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        capacity_mbps: f64,
    ) -> EdgeIndex {
        assert!(
            source.get() < self.nodes.len(),
            "called `TopologyBuilder::add_edge` with source index out of bounds: the len is {} but the index is {}",
            self.nodes.len(),
            source.get()
        );
        assert!(
            target.get() < self.nodes.len(),
            "called `TopologyBuilder::add_edge` with target index out of bounds: the len is {} but the index is {}",
            self.nodes.len(),
            target.get()
        );
        assert!(
            source != target,
            "called `TopologyBuilder::add_edge` with a self-loop on node {}",
            source.get()
        );
        assert!(
            capacity_mbps.is_finite() && capacity_mbps > 0.0,
            "called `TopologyBuilder::add_edge` with a non-positive capacity: {}",
            capacity_mbps
        );
        assert!(
            !self.edge_lookup.contains_key(&(source, target)),
            "called `TopologyBuilder::add_edge` with a duplicate edge: {} -> {}",
            source.get(),
            target.get()
        );

        let index = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            capacity_mbps,
        });
        self.edge_lookup.insert((source, target), index);
        index
    }

    /// Adds the two directed edges of a full-duplex link between `a` and `b`,
    /// both with the given raw capacity, and returns `(a -> b, b -> a)`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`TopologyBuilder::add_edge`].
    #[inline]
    pub fn add_duplex_link(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        capacity_mbps: f64,
    ) -> (EdgeIndex, EdgeIndex) {
        let forward = self.add_edge(a, b, capacity_mbps);
        let backward = self.add_edge(b, a, capacity_mbps);
        (forward, backward)
    }

    /// Builds the immutable topology, computing per-node adjacency.
    pub fn build(self) -> Topology {
        let mut outgoing = vec![Vec::new(); self.nodes.len()];
        for (index, edge) in self.edges.iter().enumerate() {
            outgoing[edge.source().get()].push(EdgeIndex::new(index));
        }

        Topology {
            nodes: self.nodes,
            edges: self.edges,
            outgoing,
            edge_lookup: self.edge_lookup,
        }
    }
}
