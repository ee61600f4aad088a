//! # Gambler's Ruin
//!
//! Monte Carlo study of the gambler's ruin problem: a gambler starts with
//! some capital and bets one unit at a time, winning with probability `p`,
//! until going broke or reaching a target.
//!
//! ## Modules
//!
//! - [`walk`] - The absorbing ±1 random walk shared by everything else
//! - [`estimator`] - Ruin probability and mean duration by simulation
//! - [`sampler`] - Full trajectories for inspection
//! - [`chart`] - Terminal rendering of trajectories
//! - [`config`] - Run configuration with environment overrides
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use gamblers_ruin::{estimator::estimate_ruin, GamblersRuin};
//!
//! let model = GamblersRuin::new(10, 50, 0.3).unwrap();
//! let mut rng = rand::thread_rng();
//!
//! let estimate = estimate_ruin(&model, 10_000, &mut rng).unwrap();
//! println!("Estimated Probability of Ruin: {}", estimate.ruin_probability);
//! println!("Average Steps Until Ruin or Success: {}", estimate.avg_steps);
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod estimator;
pub mod sampler;
pub mod walk;

pub use chart::{AsciiChart, PathRenderer};
pub use config::SimulationConfig;
pub use error::{Result, RuinError};
pub use estimator::{estimate_ruin, estimate_ruin_parallel, RuinEstimate};
pub use sampler::{sample_paths, sample_paths_parallel, Trajectory};
pub use walk::{Absorption, GamblersRuin, WalkOutcome};
