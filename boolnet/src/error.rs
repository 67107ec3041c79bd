use thiserror::Error;

/// Errors reported by the simulator.
///
/// Every variant is a contract violation by the caller; nothing here is transient.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested node count cannot hold one node of every group.
    #[error("node count {found} is too small, need at least {min}")]
    InvalidNodeCount {
        /// Requested node count.
        found: usize,
        /// Smallest accepted node count.
        min: usize,
    },
    /// A generator setting is out of range.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
    /// An initial state does not have one value per node.
    #[error("initial state has {found} values, topology has {expected} nodes")]
    StateLength {
        /// Node count of the topology.
        expected: usize,
        /// Length of the supplied state.
        found: usize,
    },
    /// A node index does not name a node of the topology.
    #[error("node {index} out of range for {node_count} nodes")]
    NodeOutOfRange {
        /// Offending index.
        index: usize,
        /// Node count of the topology.
        node_count: usize,
    },
    /// An edge starts and ends at the same node.
    #[error("self-loop on node {0}")]
    SelfLoop(usize),
    /// The same arc was given twice.
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
    },
    /// States only exist at non-negative steps.
    #[error("step {0} is negative")]
    NegativeStep(i64),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
