//! gep-engine CLI: symbolic regression driven by a TOML configuration.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gep_engine::config::ConfigManager;
use gep_engine::engines::generation::{
    ConsoleProgressCallback, EvolutionEngine, GeneticOperators, ProgressCallback, SilentProgressCallback,
};
use gep_engine::functions::{ArithmeticDecoder, FunctionRegistry};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gep-engine")]
#[command(version)]
#[command(about = "Gene Expression Programming for symbolic regression")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve an expression for the configured test cases
    Run {
        /// Configuration file (TOML or JSON)
        #[arg(short, long, default_value = "regression.toml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Override the generation limit
        #[arg(short, long)]
        generations: Option<usize>,

        /// Write the run summary as JSON
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Quiet mode (no per-generation output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "gep.toml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            generations,
            report,
            quiet,
        } => {
            if quiet {
                run(config, seed, generations, report, SilentProgressCallback)
            } else {
                run(config, seed, generations, report, ConsoleProgressCallback)
            }
        }
        Commands::Init { output } => {
            ConfigManager::new()
                .save_to_file(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Default configuration written to {}", output.display());
            Ok(())
        }
    }
}

fn run<C: ProgressCallback>(
    config_path: PathBuf,
    seed: Option<u64>,
    generations: Option<usize>,
    report: Option<PathBuf>,
    callback: C,
) -> anyhow::Result<()> {
    let manager = ConfigManager::new();
    manager
        .load_from_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    manager.update(|config| {
        if seed.is_some() {
            config.evolution.seed = seed;
        }
        if let Some(generations) = generations {
            config.evolution.max_generations = generations;
        }
    })?;
    let config = manager.get()?;

    if config.fitness.cases.is_empty() {
        bail!("No test cases in {}", config_path.display());
    }

    let registry = FunctionRegistry::new();
    let genome = Arc::new(config.genome.build(&registry)?);
    let operators = GeneticOperators::with_rates(Arc::clone(&genome), config.operators.to_rates());
    let decoder = ArithmeticDecoder::new(&registry, Arc::clone(&genome))?;

    let mut engine = EvolutionEngine::new(config.evolution.clone(), operators, decoder, config.fitness.build());
    let summary = engine.run(callback)?;

    println!();
    println!("Best expression: {}", summary.best_formula);
    println!("Chromosome:      {}", summary.best_chromosome);
    println!(
        "Fitness:         {:.6} / {:.6}{}",
        summary.best_fitness,
        summary.target_fitness,
        if summary.target_reached { " (target reached)" } else { "" }
    );
    println!("Generations:     {}", summary.generations);

    if let Some(path) = report {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
