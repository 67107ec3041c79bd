use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::topology::Topology;

/// How the values arriving over a node's incoming edges are combined.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Aggregator {
    /// True if any input is true.
    #[default]
    Or,
    /// True if every input is true.
    And,
    /// True if an odd number of inputs are true.
    Xor,
}

impl Aggregator {
    /// Combine a node's inputs, or return `None` if it has none.
    #[must_use]
    pub fn combine<I: IntoIterator<Item = bool>>(self, inputs: I) -> Option<bool> {
        let mut inputs = inputs.into_iter();
        let first = inputs.next()?;
        Some(match self {
            Self::Or => inputs.fold(first, |acc, x| acc | x),
            Self::And => inputs.fold(first, |acc, x| acc & x),
            Self::Xor => inputs.fold(first, |acc, x| acc ^ x),
        })
    }
}

/// Compute one synchronous step.
///
/// Every new value is read from `previous` alone, so visit order does not matter. Nodes without inputs keep their
/// value. `previous` must hold one value per node.
#[must_use]
pub fn next_state(topology: &Topology, previous: &[bool], aggregator: Aggregator) -> Vec<bool> {
    debug_assert_eq!(previous.len(), topology.node_count());

    (0..topology.node_count())
        .map(|node| {
            let inputs = topology.incoming(node).map(|edge| previous[edge.from] ^ edge.inverted);
            aggregator.combine(inputs).unwrap_or(previous[node])
        })
        .collect()
}

/// The distinct states reached from the initial state, in step order.
///
/// A network has finitely many states, so every trajectory ends in a cycle. Once the next state is one already seen,
/// `cycle_start` records where the cycle begins and nothing more is stored.
#[derive(Debug)]
struct Trajectory {
    states: Vec<Vec<bool>>,
    first_seen: HashMap<Vec<bool>, usize>,
    cycle_start: Option<usize>,
}

impl Trajectory {
    fn new(initial_state: Vec<bool>) -> Self {
        let mut first_seen = HashMap::new();
        first_seen.insert(initial_state.clone(), 0);
        Self {
            states: vec![initial_state],
            first_seen,
            cycle_start: None,
        }
    }

    fn state_at(&mut self, topology: &Topology, aggregator: Aggregator, step: usize) -> &[bool] {
        while self.cycle_start.is_none() && self.states.len() <= step {
            let next = next_state(topology, &self.states[self.states.len() - 1], aggregator);
            if let Some(&start) = self.first_seen.get(&next) {
                self.cycle_start = Some(start);
            } else {
                self.first_seen.insert(next.clone(), self.states.len());
                self.states.push(next);
            }
        }

        let index = match self.cycle_start {
            Some(start) if step >= self.states.len() => start + (step - start) % (self.states.len() - start),
            _ => step,
        };
        &self.states[index]
    }
}

/// A topology together with its step-0 state.
///
/// Querying a network never changes what it answers; the distinct states reached are memoised as they are computed.
#[derive(Debug)]
pub struct Network {
    topology: Topology,
    aggregator: Aggregator,
    trajectory: Mutex<Trajectory>,
}

impl Network {
    /// Create a network that combines inputs with [`Aggregator::Or`].
    ///
    /// # Errors
    ///
    /// Fails if `initial_state` does not hold exactly one value per node.
    pub fn new(topology: Topology, initial_state: Vec<bool>) -> Result<Self> {
        Self::with_aggregator(topology, initial_state, Aggregator::default())
    }

    /// Create a network with an explicit fan-in combinator.
    ///
    /// # Errors
    ///
    /// Fails if `initial_state` does not hold exactly one value per node.
    pub fn with_aggregator(topology: Topology, initial_state: Vec<bool>, aggregator: Aggregator) -> Result<Self> {
        if initial_state.len() != topology.node_count() {
            return Err(Error::StateLength {
                expected: topology.node_count(),
                found: initial_state.len(),
            });
        }

        Ok(Self {
            topology,
            aggregator,
            trajectory: Mutex::new(Trajectory::new(initial_state)),
        })
    }

    /// Returns the wiring this network evaluates.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the fan-in combinator.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    /// Returns the step-0 state.
    #[must_use]
    pub fn initial_state(&self) -> Vec<bool> {
        self.trajectory.lock().unwrap_or_else(PoisonError::into_inner).states[0].clone()
    }

    /// Returns the state of every node at `step`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NegativeStep`] if `step` is negative.
    pub fn state_at(&self, step: i64) -> Result<Vec<bool>> {
        let step = usize::try_from(step).map_err(|_| Error::NegativeStep(step))?;

        // The trajectory only ever holds fully computed states, so a poisoned lock is still consistent.
        let mut trajectory = self.trajectory.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(trajectory.state_at(&self.topology, self.aggregator, step).to_vec())
    }

    /// Returns the states at steps `0..=last`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NegativeStep`] if `last` is negative.
    pub fn states(&self, last: i64) -> Result<Vec<Vec<bool>>> {
        let last = usize::try_from(last).map_err(|_| Error::NegativeStep(last))?;

        let mut trajectory = self.trajectory.lock().unwrap_or_else(PoisonError::into_inner);
        Ok((0..=last)
            .map(|step| trajectory.state_at(&self.topology, self.aggregator, step).to_vec())
            .collect())
    }
}
