//! Run configuration for the simulation binary.
//!
//! Defaults reproduce the reference run (10 → 50, p = 0.3). Each field can be
//! overridden through an environment variable:
//! `RUIN_INITIAL_MONEY`, `RUIN_TARGET`, `RUIN_P`, `RUIN_SIMULATIONS`,
//! `RUIN_PATHS`, `RUIN_SEED` and `RAYON_NUM_THREADS`.

use std::str::FromStr;

use tracing::{info, warn};

use crate::error::{Result, RuinError};
use crate::estimator::DEFAULT_NUM_SIMULATIONS;
use crate::sampler::DEFAULT_NUM_PATHS;
use crate::walk::GamblersRuin;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_money: u64,
    pub target: u64,
    /// Probability of winning a single bet
    pub p: f64,
    pub num_simulations: usize,
    pub num_paths: usize,
    /// Seed for reproducibility (None = drawn from entropy)
    pub seed: Option<u64>,
    /// Rayon worker count (None = rayon's default)
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_money: 10,
            target: 50,
            p: 0.3,
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_paths: DEFAULT_NUM_PATHS,
            seed: None,
            threads: None,
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuinError::InvalidEnv { var, value }),
    }
}

impl SimulationConfig {
    /// Reads overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            initial_money: parse_var(&lookup, "RUIN_INITIAL_MONEY")?
                .unwrap_or(defaults.initial_money),
            target: parse_var(&lookup, "RUIN_TARGET")?.unwrap_or(defaults.target),
            p: parse_var(&lookup, "RUIN_P")?.unwrap_or(defaults.p),
            num_simulations: parse_var(&lookup, "RUIN_SIMULATIONS")?
                .unwrap_or(defaults.num_simulations),
            num_paths: parse_var(&lookup, "RUIN_PATHS")?.unwrap_or(defaults.num_paths),
            seed: parse_var(&lookup, "RUIN_SEED")?,
            threads: parse_var(&lookup, "RAYON_NUM_THREADS")?,
        })
    }

    /// Builds the validated walk model
    pub fn model(&self) -> Result<GamblersRuin> {
        GamblersRuin::new(self.initial_money, self.target, self.p)
    }

    /// Configures the global rayon pool. Tolerates an already-initialized pool.
    pub fn init_thread_pool(&self) -> usize {
        if let Some(threads) = self.threads {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
            {
                warn!(error = %e, "Rayon pool already initialized");
            }
        }
        let threads = rayon::current_num_threads();
        info!(threads, "Rayon threads");
        threads
    }
}
