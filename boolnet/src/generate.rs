//! Random topologies and initial states.
//!
//! A topology is drawn by flipping a biased coin for every ordered pair of distinct nodes, then wiring any node that
//! ended up isolated to a random partner. Candidates whose state after `probe_step` steps always equals their initial
//! state are useless as puzzles and are thrown away. After `max_attempts` rejections the generator gives up on
//! randomness and returns a star that is known to be non-degenerate, so generation always terminates.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::network::{next_state, Aggregator};
use crate::topology::{Edge, Group, Topology};
use crate::TARGET_STEP;

/// The smallest node count that can hold one node of every group.
pub const MIN_NODE_COUNT: usize = Group::ALL.len();

/// Up to this many nodes every initial state is probed when looking for degenerate topologies.
pub const EXHAUSTIVE_PROBE_LIMIT: usize = 16;

/// Tunables for [`generate_with`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Chance that any given ordered pair of nodes is joined by an edge.
    pub edge_probability: f64,
    /// Candidates drawn before falling back to the star.
    pub max_attempts: usize,
    /// Step compared against step 0 when judging a candidate.
    pub probe_step: i64,
    /// Random initial states probed when the network is too large to probe exhaustively.
    pub probe_samples: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            edge_probability: 0.25,
            max_attempts: 64,
            probe_step: TARGET_STEP,
            probe_samples: 256,
        }
    }
}

impl GeneratorConfig {
    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(Error::InvalidConfig(format!(
                "edge_probability must be within [0, 1], got {}",
                self.edge_probability
            )));
        }
        if self.probe_step < 1 {
            return Err(Error::InvalidConfig(format!("probe_step must be at least 1, got {}", self.probe_step)));
        }
        if self.probe_samples == 0 {
            return Err(Error::InvalidConfig("probe_samples must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Generate a topology with the default [`GeneratorConfig`].
///
/// # Errors
///
/// Fails if `node_count` is smaller than [`MIN_NODE_COUNT`].
pub fn generate<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Result<Topology> {
    generate_with(&GeneratorConfig::default(), node_count, rng)
}

/// Generate a topology.
///
/// The result has no self-loops, no isolated nodes, uses every [`Group`], and for at least one initial state its
/// state at `config.probe_step` differs from its initial state.
///
/// # Errors
///
/// Fails if `node_count` is smaller than [`MIN_NODE_COUNT`] or `config` is invalid.
pub fn generate_with<R: Rng + ?Sized>(config: &GeneratorConfig, node_count: usize, rng: &mut R) -> Result<Topology> {
    if node_count < MIN_NODE_COUNT {
        return Err(Error::InvalidNodeCount { found: node_count, min: MIN_NODE_COUNT });
    }
    config.validate()?;

    let groups = random_groups(node_count, rng);

    for attempt in 1..=config.max_attempts {
        let topology = Topology::from_parts(groups.clone(), random_edges(config.edge_probability, node_count, rng))?;

        if is_degenerate(&topology, config, rng) {
            debug!(attempt, %topology, "rejected degenerate topology");
            continue;
        }

        info!(attempt, edges = topology.edge_count(), %topology, "generated topology");
        return Ok(topology);
    }

    warn!(max_attempts = config.max_attempts, "every candidate was degenerate, falling back to a star");
    Topology::from_parts(groups, star(node_count))
}

/// Draw a random initial state.
pub fn random_state<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Vec<bool> {
    (0..node_count).map(|_| rng.gen()).collect()
}

/// Returns true if no probed initial state changes between step 0 and `config.probe_step`.
///
/// A network without a single incoming edge is degenerate outright.
pub fn is_degenerate<R: Rng + ?Sized>(topology: &Topology, config: &GeneratorConfig, rng: &mut R) -> bool {
    let node_count = topology.node_count();
    if !(0..node_count).any(|node| topology.has_incoming(node)) {
        return true;
    }

    let steps = usize::try_from(config.probe_step).unwrap_or(0);

    let changes = |initial: &Vec<bool>| {
        let mut state = initial.clone();
        for _ in 0..steps {
            state = next_state(topology, &state, Aggregator::Or);
        }
        state != *initial
    };

    if node_count <= EXHAUSTIVE_PROBE_LIMIT {
        !(0..1_u32 << node_count)
            .map(|bits| (0..node_count).map(|node| (bits >> node) & 1 == 1).collect::<Vec<_>>())
            .any(|initial| changes(&initial))
    } else {
        !(0..config.probe_samples)
            .map(|_| random_state(node_count, rng))
            .any(|initial| changes(&initial))
    }
}

/// One group of each kind, the rest uniform, in random order.
fn random_groups<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Vec<Group> {
    let mut groups = Group::ALL.to_vec();
    groups.extend((Group::ALL.len()..node_count).map(|_| Group::ALL[rng.gen_range(0..Group::ALL.len())]));
    groups.shuffle(rng);
    groups
}

fn random_edges<R: Rng + ?Sized>(edge_probability: f64, node_count: usize, rng: &mut R) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut connected = vec![false; node_count];

    for from in 0..node_count {
        for to in 0..node_count {
            if from != to && rng.gen_bool(edge_probability) {
                edges.push(Edge::new(from, to, rng.gen_bool(0.5)));
                connected[from] = true;
                connected[to] = true;
            }
        }
    }

    // Every node must sit on at least one edge.
    for node in 0..node_count {
        if connected[node] {
            continue;
        }

        let mut partner = rng.gen_range(0..node_count - 1);
        if partner >= node {
            partner += 1;
        }

        let edge = if rng.gen_bool(0.5) {
            Edge::new(node, partner, rng.gen_bool(0.5))
        } else {
            Edge::new(partner, node, rng.gen_bool(0.5))
        };
        edges.push(edge);
        connected[node] = true;
        connected[partner] = true;
    }

    edges
}

/// Node 0 feeds every other node, through an inverter only for node 1.
///
/// Node 0 has no inputs, so from step 1 on node 1 holds the negation of node 0. Any initial state where the two agree
/// therefore changes, whatever the probe step.
fn star(node_count: usize) -> Vec<Edge> {
    (1..node_count).map(|to| Edge::new(0, to, to == 1)).collect()
}
