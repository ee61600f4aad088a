//! Reference run of the gambler's ruin simulation
//!
//! Run with: cargo run --release
//! Override parameters with RUIN_* environment variables, log level with RUST_LOG.

use rand::Rng;
use tracing::error;
use tracing_subscriber::EnvFilter;

use gamblers_ruin::{
    estimate_ruin_parallel, sample_paths_parallel, AsciiChart, PathRenderer, SimulationConfig,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = %e, "Simulation failed");
        std::process::exit(1);
    }
}

fn run() -> gamblers_ruin::Result<()> {
    let config = SimulationConfig::from_env()?;
    let model = config.model()?;
    config.init_thread_pool();

    // Replay a run with RUIN_SEED=<logged seed>
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, "Using seed");

    println!("=== Gambler's Ruin ===\n");
    println!(
        "Initial money: {}, target: {}, p = {}",
        model.initial_money(),
        model.target(),
        model.p()
    );
    println!("Simulations: {}\n", config.num_simulations);

    let estimate = estimate_ruin_parallel(&model, config.num_simulations, seed)?;
    println!("Estimated Probability of Ruin: {}", estimate.ruin_probability);
    println!("Average Steps Until Ruin or Success: {}", estimate.avg_steps);
    println!(
        "  95% CI: [{:.4}, {:.4}], longest walk: {} bets\n",
        estimate.ci_lower, estimate.ci_upper, estimate.max_steps
    );

    // Paths draw from their own seed, independent of the estimator's trials
    let paths = sample_paths_parallel(&model, config.num_paths, seed.wrapping_add(1))?;
    let chart = AsciiChart::default();
    print!("{}", chart.render(&paths, model.target()));

    Ok(())
}
