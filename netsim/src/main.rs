mod cli;

use std::fs;

use anyhow::{Context, Result};
use boolnet::{check, generate_with, random_state, GeneratorConfig, Network, TARGET_STEP};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn render(state: &[bool]) -> String {
    state.iter().map(|&on| if on { '1' } else { '0' }).collect()
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, nodes = cli.nodes, "generating network");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let topology = generate_with(&config, cli.nodes, &mut rng)?;
    let initial = random_state(cli.nodes, &mut rng);
    let network = Network::new(topology, initial)?;

    println!("groups: {}", network.topology().groups().map(|group| group.label()).collect::<String>());
    for edge in network.topology().edges() {
        println!("edge: {}", edge);
    }
    if cli.steps < 0 {
        return Err(boolnet::Error::NegativeStep(cli.steps).into());
    }
    for step in 0..=cli.steps {
        println!("step {}: {}", step, render(&network.state_at(step)?));
    }

    if let Some(path) = &cli.graphviz {
        let f = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        network.topology().to_graphviz(f)?;
        info!(path = %path.display(), "wrote graphviz");
    }

    if let Some(answer) = &cli.answer {
        let verdict = check(&network, TARGET_STEP, answer)?;
        if verdict.is_correct() {
            println!("correct");
        } else {
            println!("wrong ({})", verdict);
            std::process::exit(1);
        }
    }

    Ok(())
}
