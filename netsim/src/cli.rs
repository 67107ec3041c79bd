//! Command-line interface.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "netsim", version, about = "Generate and solve boolean network puzzles")]
pub struct Cli {
    /// Seed for the random generator; a fresh one is drawn if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of nodes in the network
    #[arg(short, long, default_value_t = boolnet::DEFAULT_NODE_COUNT)]
    pub nodes: usize,

    /// Last step to print
    #[arg(short, long, default_value_t = boolnet::TARGET_STEP)]
    pub steps: i64,

    /// Generator settings as YAML
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the topology to this file as a Graphviz digraph
    #[arg(long)]
    pub graphviz: Option<PathBuf>,

    /// Comma-separated nodes to check against the target step; pass the flag alone to select nothing
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub answer: Option<Vec<usize>>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["netsim"]).unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.nodes, 6);
        assert_eq!(cli.steps, 3);
        assert!(cli.config.is_none());
        assert!(cli.answer.is_none());
    }

    #[test]
    fn answer_list() {
        let cli = Cli::try_parse_from(["netsim", "--seed", "42", "--answer", "0,2,5"]).unwrap();
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.answer, Some(vec![0, 2, 5]));

        let cli = Cli::try_parse_from(["netsim", "--answer"]).unwrap();
        assert_eq!(cli.answer, Some(vec![]));
    }

    #[test]
    fn rejects_bad_answer() {
        assert!(Cli::try_parse_from(["netsim", "--answer", "a,b"]).is_err());
    }
}
