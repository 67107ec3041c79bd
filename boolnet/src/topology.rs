use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use itertools::Itertools;
use petgraph::{prelude::*, visit::EdgeRef};

use crate::error::{Error, Result};

/// A cosmetic node classification.
///
/// Groups are shown to the player but never take part in evaluation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Group {
    /// Group 0.
    Red,
    /// Group 1.
    Green,
    /// Group 2.
    Blue,
}

impl Group {
    /// Every group, in index order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Returns the group with the given index, if there is one.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the index of this group.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Returns the one-letter label used for colorblind-assist text.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }

    const fn colour(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A network node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// Cosmetic group of this node.
    pub group: Group,
}

/// A directed arc between two nodes.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Edge {
    /// Source node index.
    pub from: usize,
    /// Target node index.
    pub to: usize,
    /// Whether the source value is negated before it reaches the target.
    pub inverted: bool,
}

impl Edge {
    /// Create an edge.
    #[must_use]
    pub const fn new(from: usize, to: usize, inverted: bool) -> Self {
        Self { from, to, inverted }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{} {}", self.from, if self.inverted { "o" } else { ">" }, self.to)
    }
}

/// The frozen wiring of one network.
///
/// Edge weights are inversion flags. Once built a topology is never mutated.
#[derive(Clone, Debug)]
pub struct Topology {
    graph: StableGraph<Node, bool, Directed>,
}

impl Topology {
    /// Build a topology from one group per node and a list of edges.
    ///
    /// # Errors
    ///
    /// Fails if an edge names a node that does not exist, is a self-loop, or repeats an arc.
    pub fn from_parts<I>(groups: Vec<Group>, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let node_count = groups.len();
        let edges = edges.into_iter().sorted_by_key(|edge| (edge.from, edge.to)).collect::<Vec<_>>();

        let mut seen = HashSet::with_capacity(edges.len());
        for edge in &edges {
            for index in [edge.from, edge.to] {
                if index >= node_count {
                    return Err(Error::NodeOutOfRange { index, node_count });
                }
            }
            if edge.from == edge.to {
                return Err(Error::SelfLoop(edge.from));
            }
            if !seen.insert((edge.from, edge.to)) {
                return Err(Error::DuplicateEdge { from: edge.from, to: edge.to });
            }
        }

        let mut graph = StableGraph::with_capacity(node_count, edges.len());
        for group in groups {
            graph.add_node(Node { group });
        }
        for edge in edges {
            graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), edge.inverted);
        }

        Ok(Self { graph })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the group of a node, or `None` if there is no such node.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<Group> {
        self.graph.node_weight(NodeIndex::new(index)).map(|node| node.group)
    }

    /// Returns the group of every node, in index order.
    pub fn groups(&self) -> impl Iterator<Item = Group> + '_ {
        self.graph.node_indices().map(move |node| self.graph[node].group)
    }

    /// Returns every edge, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_indices().filter_map(move |edge| self.edge(edge))
    }

    /// Returns the edges that end at a node.
    pub fn incoming(&self, index: usize) -> impl Iterator<Item = Edge> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(index), Incoming)
            .filter_map(move |edge| self.edge(edge.id()))
    }

    /// Returns true if at least one edge ends at this node.
    #[must_use]
    pub fn has_incoming(&self, index: usize) -> bool {
        self.incoming(index).next().is_some()
    }

    /// Returns true if the node is the source or target of some edge.
    #[must_use]
    pub fn is_connected(&self, index: usize) -> bool {
        let node = NodeIndex::new(index);
        self.graph.neighbors_undirected(node).next().is_some()
    }

    fn edge(&self, edge: EdgeIndex) -> Option<Edge> {
        let (from, to) = self.graph.edge_endpoints(edge)?;
        let inverted = *self.graph.edge_weight(edge)?;
        Some(Edge::new(from.index(), to.index(), inverted))
    }

    /// Write the topology as a Graphviz digraph.
    ///
    /// # Errors
    ///
    /// Propagates any error from the writer.
    pub fn to_graphviz<W: Write>(&self, mut f: W) -> std::io::Result<()> {
        writeln!(f, "strict digraph {{")?;

        for (index, group) in self.groups().enumerate() {
            writeln!(f, "{} [shape=circle,color={},label=\"{0} ({})\"];", index, group.colour(), group.label())?;
        }

        for edge in self.edges() {
            writeln!(
                f,
                "{} -> {} {};",
                edge.from,
                edge.to,
                if edge.inverted { "[dir=both,arrowtail=odot]" } else { "" }
            )?;
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "groups [{}] edges [{}]", self.groups().join(" "), self.edges().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, Error, Group, Topology};

    fn triangle() -> Topology {
        Topology::from_parts(
            vec![Group::Red, Group::Green, Group::Blue],
            vec![Edge::new(1, 2, true), Edge::new(0, 2, false), Edge::new(2, 0, false)],
        )
        .expect("triangle is a valid topology")
    }

    #[test]
    fn edges_are_sorted() {
        let topology = triangle();
        let edges = topology.edges().collect::<Vec<_>>();
        assert_eq!(edges, vec![Edge::new(0, 2, false), Edge::new(1, 2, true), Edge::new(2, 0, false)]);
        assert_eq!(topology.edge_count(), 3);
    }

    #[test]
    fn incoming_edges() {
        let topology = triangle();

        let mut incoming = topology.incoming(2).collect::<Vec<_>>();
        incoming.sort_by_key(|edge| edge.from);
        assert_eq!(incoming, vec![Edge::new(0, 2, false), Edge::new(1, 2, true)]);

        assert!(topology.has_incoming(0));
        assert!(!topology.has_incoming(1));
        assert!(topology.is_connected(1));
    }

    #[test]
    fn groups() {
        let topology = triangle();
        assert_eq!(topology.group(0), Some(Group::Red));
        assert_eq!(topology.group(2), Some(Group::Blue));
        assert_eq!(topology.group(3), None);
        assert_eq!(topology.groups().map(Group::label).collect::<String>(), "RGB");
        assert_eq!(Group::from_index(1), Some(Group::Green));
        assert_eq!(Group::Blue.index(), 2);
        assert!(Group::ALL.iter().all(|&group| Group::from_index(group.index()) == Some(group)));
        assert_eq!(Group::from_index(3), None);
    }

    #[test]
    fn rejects_bad_edges() {
        let groups = vec![Group::Red; 3];

        assert_eq!(
            Topology::from_parts(groups.clone(), vec![Edge::new(0, 3, false)]).unwrap_err(),
            Error::NodeOutOfRange { index: 3, node_count: 3 }
        );
        assert_eq!(
            Topology::from_parts(groups.clone(), vec![Edge::new(1, 1, true)]).unwrap_err(),
            Error::SelfLoop(1)
        );
        assert_eq!(
            Topology::from_parts(groups, vec![Edge::new(0, 1, false), Edge::new(0, 1, true)]).unwrap_err(),
            Error::DuplicateEdge { from: 0, to: 1 }
        );
    }

    #[test]
    fn graphviz() {
        let mut out = Vec::new();
        triangle().to_graphviz(&mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.starts_with("strict digraph {"));
        assert!(dot.contains("0 [shape=circle,color=red,label=\"0 (R)\"];"));
        assert!(dot.contains("1 -> 2 [dir=both,arrowtail=odot];"));
        assert!(dot.contains("0 -> 2 ;"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn display() {
        assert_eq!(triangle().to_string(), "groups [R G B] edges [0 -> 2, 1 -o 2, 2 -> 0]");
    }
}
