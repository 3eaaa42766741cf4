//! Recycling Robot CLI
//!
//! Trains the agent for several independent runs and writes the results.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default config
//! recycling-robot
//!
//! # Reproducible run with more epochs
//! RECYCLING_SEED=7 RECYCLING_EPOCHS=100 recycling-robot
//!
//! # Load a JSON config
//! recycling-robot --config sim.json
//! ```

use clap::Parser;
use recycling_robot::config::{
    ENV_DATA_DIR, ENV_EPOCHS, ENV_EPSILON, ENV_RUNS, ENV_SEED, ENV_STEPS_PER_EPOCH,
};
use recycling_robot::{ReportWriter, Result, SimulationConfig, Trainer};
use std::path::PathBuf;

/// Recycling robot trainer
#[derive(Parser, Debug)]
#[command(name = "recycling-robot")]
#[command(version)]
#[command(about = "Trains the recycling robot and writes result files", long_about = None)]
#[command(after_help = env_help())]
struct Args {
    /// Load a JSON simulation config instead of reading the environment
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn env_help() -> String {
    let vars = [
        (ENV_EPOCHS, "Epochs per training run"),
        (ENV_STEPS_PER_EPOCH, "Steps per epoch"),
        (ENV_RUNS, "Independent training runs"),
        (ENV_SEED, "Random seed"),
        (ENV_EPSILON, "Initial exploration rate"),
        (ENV_DATA_DIR, "Output directory"),
        ("RUST_LOG", "Log filter (default: info)"),
    ];
    let mut help = String::from("Environment (ignored when --config is given):\n");
    for (name, meaning) in vars {
        help.push_str(&format!("  {:<28} {}\n", name, meaning));
    }
    help
}

fn print_config(config: &SimulationConfig) {
    println!("Configuration:");
    println!("  Rewards: search {}, wait {}", config.r_search, config.r_wait);
    println!(
        "  Transitions: high->low {}, deplete {}",
        config.high_to_low_prob, config.deplete_prob
    );
    println!(
        "  Agent: alpha {}, gamma {}, epsilon {}",
        config.agent.learning_rate, config.agent.gamma, config.agent.epsilon
    );
    println!(
        "  Runs: {} x {} epochs x {} steps",
        config.runs, config.epochs, config.steps_per_epoch
    );
    match config.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: entropy"),
    }
    println!("  Data dir: {}", config.data_dir.display());
    println!();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match args.config {
        Some(path) => SimulationConfig::from_json_file(&path)?,
        None => SimulationConfig::from_env(),
    };

    print_config(&config);

    let writer = ReportWriter::new(&config.data_dir)?;
    let mut trainer = Trainer::new(config)?;
    let report = trainer.run();
    writer.write_report(&report)?;

    let means = report.mean_reward_by_epoch();
    if let (Some(first), Some(last)) = (means.first(), means.last()) {
        println!(
            "Mean total reward: first epoch {:.2}, last epoch {:.2}",
            first, last
        );
    }
    for policy in &report.policies {
        println!(
            "Training {}: high [search {:.3}, wait {:.3}] low [search {:.3}, wait {:.3}, recharge {:.3}]",
            policy.training,
            policy.high_search,
            policy.high_wait,
            policy.low_search,
            policy.low_wait,
            policy.low_recharge
        );
    }
    println!("Results written to {}", writer.rewards_path().display());

    Ok(())
}
