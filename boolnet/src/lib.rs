//! A small synchronous boolean network simulator.
//!
//! A network is a fixed set of nodes wired together by directed edges, each of which may invert the value it carries.
//! Every node holds one boolean per step. Step 0 is given; at every later step a node with inputs takes the OR of its
//! (possibly inverted) inputs from the previous step, and a node without inputs keeps its value.
//!
//! The simulator backs a puzzle: a random topology and initial state are shown to the player, who must select exactly
//! the nodes that are on at [`TARGET_STEP`].
//!
//! ```
//! use boolnet::{generate, is_correct, random_state, Network, DEFAULT_NODE_COUNT, TARGET_STEP};
//!
//! let mut rng = rand::thread_rng();
//! let topology = generate(DEFAULT_NODE_COUNT, &mut rng).unwrap();
//! let initial = random_state(DEFAULT_NODE_COUNT, &mut rng);
//! let network = Network::new(topology, initial).unwrap();
//!
//! let answer = network
//!     .state_at(TARGET_STEP)
//!     .unwrap()
//!     .into_iter()
//!     .enumerate()
//!     .filter_map(|(node, on)| if on { Some(node) } else { None })
//!     .collect::<Vec<_>>();
//! assert!(is_correct(&network, TARGET_STEP, &answer).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod answer;
pub mod error;
pub mod generate;
pub mod network;
pub mod topology;

pub use answer::{check, is_correct, Verdict};
pub use error::{Error, Result};
pub use generate::{generate, generate_with, random_state, GeneratorConfig};
pub use network::{Aggregator, Network};
pub use topology::{Edge, Group, Topology};

/// Node count of a standard puzzle.
pub const DEFAULT_NODE_COUNT: usize = 6;

/// Step the player has to predict.
pub const TARGET_STEP: i64 = 3;
