//! Monte Carlo estimation of the ruin probability
//!
//! Runs many independent walks and aggregates their outcomes:
//! - Fraction of walks absorbed at 0
//! - Mean number of bets per walk, whichever barrier was hit
//! - Standard error and 95% confidence interval of the ruin probability

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, RuinError};
use crate::walk::{trial_rng, GamblersRuin, WalkOutcome};

/// Number of walks simulated when the caller has no preference
pub const DEFAULT_NUM_SIMULATIONS: usize = 10_000;

/// Aggregate result of a ruin estimation run
#[derive(Debug, Clone, PartialEq)]
pub struct RuinEstimate {
    /// Fraction of walks absorbed at 0
    pub ruin_probability: f64,
    /// Mean number of bets per walk
    pub avg_steps: f64,
    /// Standard error of `ruin_probability`
    pub std_error: f64,
    /// 95% confidence interval (lower bound, clamped to 0)
    pub ci_lower: f64,
    /// 95% confidence interval (upper bound, clamped to 1)
    pub ci_upper: f64,
    /// Number of walks that ended in ruin
    pub ruin_count: usize,
    /// Longest walk observed
    pub max_steps: u64,
    /// Number of walks simulated
    pub n_simulations: usize,
}

/// Running totals over simulated walks
///
/// Merging is exact integer arithmetic, so the order in which tallies are
/// combined never changes the resulting estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    walks: usize,
    ruin_count: usize,
    total_steps: u128,
    max_steps: u64,
}

impl Tally {
    fn record(mut self, outcome: WalkOutcome) -> Self {
        self.walks += 1;
        if outcome.is_ruin() {
            self.ruin_count += 1;
        }
        self.total_steps += outcome.steps as u128;
        self.max_steps = self.max_steps.max(outcome.steps);
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            walks: self.walks + other.walks,
            ruin_count: self.ruin_count + other.ruin_count,
            total_steps: self.total_steps + other.total_steps,
            max_steps: self.max_steps.max(other.max_steps),
        }
    }

    /// Converts the totals of at least one walk into an estimate
    fn into_estimate(self) -> RuinEstimate {
        let n = self.walks as f64;
        let ruin_probability = self.ruin_count as f64 / n;
        let avg_steps = self.total_steps as f64 / n;

        // Bernoulli proportion: Var = p(1 - p) / n
        let std_error = (ruin_probability * (1.0 - ruin_probability) / n).sqrt();
        let margin = 1.96 * std_error;

        RuinEstimate {
            ruin_probability,
            avg_steps,
            std_error,
            ci_lower: (ruin_probability - margin).max(0.0),
            ci_upper: (ruin_probability + margin).min(1.0),
            ruin_count: self.ruin_count,
            max_steps: self.max_steps,
            n_simulations: self.walks,
        }
    }
}

fn check_simulations(num_simulations: usize) -> Result<()> {
    if num_simulations == 0 {
        return Err(RuinError::invalid(
            "num_simulations",
            "at least one walk must be simulated",
        ));
    }
    Ok(())
}

/// Estimates the ruin probability by sequential simulation
///
/// Every walk draws from `rng`, so a seeded generator gives a reproducible
/// estimate.
///
/// # Errors
/// Returns [`RuinError::InvalidParameter`] if `num_simulations` is 0.
///
/// # Example
/// ```
/// use gamblers_ruin::{estimator::estimate_ruin, GamblersRuin};
///
/// let model = GamblersRuin::new(10, 50, 0.0).unwrap();
/// let mut rng = rand::thread_rng();
/// let estimate = estimate_ruin(&model, 1_000, &mut rng).unwrap();
/// assert_eq!(estimate.ruin_probability, 1.0);
/// assert_eq!(estimate.avg_steps, 10.0);
/// ```
pub fn estimate_ruin<R: Rng>(
    model: &GamblersRuin,
    num_simulations: usize,
    rng: &mut R,
) -> Result<RuinEstimate> {
    check_simulations(num_simulations)?;

    info!(
        simulations = num_simulations,
        initial_money = model.initial_money(),
        target = model.target(),
        p = model.p(),
        "Running ruin estimation"
    );

    let mut tally = Tally::default();
    for i in 1..=num_simulations {
        tally = tally.record(model.simulate(rng));

        if i % 1000 == 0 {
            debug!(trial = i, "Ruin estimation progress");
        }
    }

    let estimate = tally.into_estimate();
    info!(
        ruin_probability = estimate.ruin_probability,
        avg_steps = estimate.avg_steps,
        "Ruin estimation finished"
    );

    Ok(estimate)
}

/// Estimates the ruin probability with trials spread across the rayon pool
///
/// Trial `i` draws from [`trial_rng`]`(seed, i)`, so the estimate depends
/// only on `seed` and never on thread count or scheduling.
///
/// # Errors
/// Returns [`RuinError::InvalidParameter`] if `num_simulations` is 0.
pub fn estimate_ruin_parallel(
    model: &GamblersRuin,
    num_simulations: usize,
    seed: u64,
) -> Result<RuinEstimate> {
    check_simulations(num_simulations)?;

    info!(
        simulations = num_simulations,
        initial_money = model.initial_money(),
        target = model.target(),
        p = model.p(),
        seed,
        threads = rayon::current_num_threads(),
        "Running parallel ruin estimation"
    );

    let estimate = (0..num_simulations as u64)
        .into_par_iter()
        .fold(Tally::default, |tally, trial| {
            let mut rng = trial_rng(seed, trial);
            tally.record(model.simulate(&mut rng))
        })
        .reduce(Tally::default, Tally::merge)
        .into_estimate();
    info!(
        ruin_probability = estimate.ruin_probability,
        avg_steps = estimate.avg_steps,
        "Ruin estimation finished"
    );

    Ok(estimate)
}
