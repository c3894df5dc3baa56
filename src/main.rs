use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use curio_lib::config::ExperimentConfig;
use curio_lib::evolve::Experiment;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in maze name ("medium", "hard") or path to a layout file
    #[arg(short, long)]
    maze: Option<String>,

    /// Number of generations to evolve
    #[arg(short, long)]
    generations: Option<usize>,

    /// Population size per generation
    #[arg(short, long)]
    population: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Custom config file path
    #[arg(short, long, default_value = "curio.toml")]
    config: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = ExperimentConfig::load(&args.config);
    if let Some(maze) = args.maze {
        config.maze = maze;
    }
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(population) = args.population {
        config.population_size = population;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    tracing::info!(
        maze = %config.maze,
        generations = config.generations,
        population = config.population_size,
        seed = config.seed,
        "starting novelty search"
    );

    let mut experiment = Experiment::new(config)?;
    let report = experiment.run()?;
    println!("{}", report.to_json()?);
    Ok(())
}
