use std::fmt;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::network::Network;

/// The outcome of checking a selection against a network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// State of every node at the target step.
    pub expected: Vec<bool>,
    /// Whether each node was selected.
    pub received: Vec<bool>,
}

impl Verdict {
    /// Returns true if every node was selected exactly when it is on.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.expected == self.received
    }

    /// Returns the nodes where the selection disagrees with the network.
    pub fn mismatches(&self) -> impl Iterator<Item = usize> + '_ {
        self.expected
            .iter()
            .zip(&self.received)
            .positions(|(expected, received)| expected != received)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected: {}, received: {}", self.expected.iter().join(", "), self.received.iter().join(", "))
    }
}

/// Compare a set of selected nodes against the state at `target_step`.
///
/// # Errors
///
/// Fails if `target_step` is negative or a selected index names no node.
pub fn check(network: &Network, target_step: i64, selected: &[usize]) -> Result<Verdict> {
    let node_count = network.node_count();

    let mut received = vec![false; node_count];
    for &index in selected {
        *received.get_mut(index).ok_or(Error::NodeOutOfRange { index, node_count })? = true;
    }

    Ok(Verdict {
        expected: network.state_at(target_step)?,
        received,
    })
}

/// Returns true if exactly the nodes that are on at `target_step` were selected.
///
/// # Errors
///
/// Fails if `target_step` is negative or a selected index names no node.
pub fn is_correct(network: &Network, target_step: i64, selected: &[usize]) -> Result<bool> {
    check(network, target_step, selected).map(|verdict| verdict.is_correct())
}

#[cfg(test)]
mod tests {
    use super::{check, is_correct};
    use crate::error::Error;
    use crate::network::Network;
    use crate::topology::{Edge, Group, Topology};

    fn network() -> Network {
        // x2' = x0 | !x1, x0 and x1 are constant.
        let topology = Topology::from_parts(
            vec![Group::Red, Group::Green, Group::Blue],
            vec![Edge::new(0, 2, false), Edge::new(1, 2, true)],
        )
        .unwrap();
        Network::new(topology, vec![false, true, true]).unwrap()
    }

    #[test]
    fn selection_matches_state() {
        let network = network();
        assert_eq!(network.state_at(3).unwrap(), vec![false, true, false]);

        assert!(is_correct(&network, 3, &[1]).unwrap());
        assert!(!is_correct(&network, 3, &[]).unwrap());
        assert!(!is_correct(&network, 3, &[1, 2]).unwrap());

        // Step 0 still has node 2 on.
        assert!(is_correct(&network, 0, &[1, 2]).unwrap());
    }

    #[test]
    fn order_and_repeats_do_not_matter() {
        let network = network();
        assert!(is_correct(&network, 3, &[1, 1]).unwrap());
        assert_eq!(check(&network, 0, &[2, 1]).unwrap(), check(&network, 0, &[1, 2]).unwrap());
    }

    #[test]
    fn verdict_reports_mismatches() {
        let verdict = check(&network(), 3, &[0, 1]).unwrap();

        assert!(!verdict.is_correct());
        assert_eq!(verdict.mismatches().collect::<Vec<_>>(), vec![0]);
        assert_eq!(verdict.to_string(), "expected: false, true, false, received: true, true, false");
    }

    #[test]
    fn rejects_bad_input() {
        let network = network();
        assert_eq!(is_correct(&network, 3, &[3]).unwrap_err(), Error::NodeOutOfRange { index: 3, node_count: 3 });
        assert_eq!(is_correct(&network, -1, &[]).unwrap_err(), Error::NegativeStep(-1));
    }
}
