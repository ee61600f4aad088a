//! Sample trajectories of the gambler's capital
//!
//! Produces a handful of complete walks for inspection. Rendering them is
//! left to a [`PathRenderer`](crate::chart::PathRenderer).

use rand::Rng;
use rayon::prelude::*;
use tracing::info;

use crate::error::{Result, RuinError};
use crate::walk::{trial_rng, GamblersRuin};

/// Number of trajectories sampled when the caller has no preference
pub const DEFAULT_NUM_PATHS: usize = 5;

/// Capital after each bet of one walk, from the start to absorption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    values: Vec<u64>,
}

impl From<Vec<u64>> for Trajectory {
    fn from(values: Vec<u64>) -> Self {
        Self::new(values)
    }
}

impl Trajectory {
    /// Wraps a recorded walk
    ///
    /// # Panics
    /// Panics if `values` is empty; a trajectory holds at least its start value.
    ///
    /// # Example
    /// ```
    /// use gamblers_ruin::Trajectory;
    ///
    /// let path = Trajectory::new(vec![2, 1, 0]);
    /// assert!(path.ends_in_ruin());
    /// assert_eq!(path.num_bets(), 2);
    /// ```
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "trajectory needs a starting value");
        Self { values }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn start(&self) -> u64 {
        self.values[0]
    }

    /// Absorbing value, either 0 or the target
    pub fn final_value(&self) -> u64 {
        self.values[self.values.len() - 1]
    }

    /// Number of bets placed
    pub fn num_bets(&self) -> usize {
        self.values.len() - 1
    }

    pub fn ends_in_ruin(&self) -> bool {
        self.final_value() == 0
    }

    /// Highest capital reached along the way
    pub fn peak(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

fn check_paths(num_paths: usize) -> Result<()> {
    if num_paths == 0 {
        return Err(RuinError::invalid(
            "num_paths",
            "at least one path must be sampled",
        ));
    }
    Ok(())
}

/// Samples `num_paths` trajectories from `rng`
///
/// # Errors
/// Returns [`RuinError::InvalidParameter`] if `num_paths` is 0.
///
/// # Example
/// ```
/// use gamblers_ruin::{sampler::sample_paths, GamblersRuin};
///
/// let model = GamblersRuin::new(10, 50, 0.3).unwrap();
/// let mut rng = rand::thread_rng();
/// let paths = sample_paths(&model, 5, &mut rng).unwrap();
///
/// assert_eq!(paths.len(), 5);
/// assert!(paths.iter().all(|t| t.start() == 10));
/// ```
pub fn sample_paths<R: Rng>(
    model: &GamblersRuin,
    num_paths: usize,
    rng: &mut R,
) -> Result<Vec<Trajectory>> {
    check_paths(num_paths)?;
    info!(paths = num_paths, "Sampling trajectories");

    Ok((0..num_paths)
        .map(|_| Trajectory::new(model.generate_path(rng)))
        .collect())
}

/// Samples `num_paths` trajectories in parallel
///
/// Path `i` is drawn from [`trial_rng`]`(seed, i)`.
///
/// # Errors
/// Returns [`RuinError::InvalidParameter`] if `num_paths` is 0.
pub fn sample_paths_parallel(
    model: &GamblersRuin,
    num_paths: usize,
    seed: u64,
) -> Result<Vec<Trajectory>> {
    check_paths(num_paths)?;
    info!(paths = num_paths, seed, "Sampling trajectories in parallel");

    Ok((0..num_paths as u64)
        .into_par_iter()
        .map(|path| {
            let mut rng = trial_rng(seed, path);
            Trajectory::new(model.generate_path(&mut rng))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn assert_valid_walk(t: &Trajectory, initial: u64, target: u64) {
        assert_eq!(t.start(), initial);
        assert!(t.final_value() == 0 || t.final_value() == target);
        assert!(t.values().windows(2).all(|w| w[0].abs_diff(w[1]) == 1));
        assert!(t.values()[..t.num_bets()]
            .iter()
            .all(|&m| m > 0 && m < target));
    }

    #[test]
    fn test_zero_paths_rejected() {
        let model = GamblersRuin::new(10, 50, 0.3).unwrap();
        assert!(matches!(
            sample_paths(&model, 0, &mut test_rng()),
            Err(RuinError::InvalidParameter { name: "num_paths", .. })
        ));
        assert!(sample_paths_parallel(&model, 0, 1).is_err());
    }

    #[test]
    fn test_paths_are_valid_walks() {
        let model = GamblersRuin::new(10, 50, 0.3).unwrap();

        let paths = sample_paths(&model, DEFAULT_NUM_PATHS, &mut test_rng()).unwrap();
        assert_eq!(paths.len(), DEFAULT_NUM_PATHS);
        for t in &paths {
            assert_valid_walk(t, 10, 50);
        }

        let paths = sample_paths_parallel(&model, 100, 3).unwrap();
        assert_eq!(paths.len(), 100);
        for t in &paths {
            assert_valid_walk(t, 10, 50);
        }
    }

    #[test]
    fn test_deterministic_paths() {
        let up = GamblersRuin::new(3, 8, 1.0).unwrap();
        let paths = sample_paths(&up, 2, &mut test_rng()).unwrap();
        assert!(paths.iter().all(|t| t.values() == [3, 4, 5, 6, 7, 8]));
        assert!(paths.iter().all(|t| !t.ends_in_ruin() && t.num_bets() == 5));

        let down = GamblersRuin::new(3, 8, 0.0).unwrap();
        let paths = sample_paths(&down, 2, &mut test_rng()).unwrap();
        assert!(paths.iter().all(|t| t.values() == [3, 2, 1, 0]));
        assert!(paths.iter().all(|t| t.ends_in_ruin() && t.peak() == 3));
    }

    #[test]
    fn test_trajectory_from_recorded_values() {
        let t = Trajectory::from(vec![4, 5, 4, 3]);
        assert_eq!(t.start(), 4);
        assert_eq!(t.final_value(), 3);
        assert_eq!(t.peak(), 5);
        assert_eq!(t, Trajectory::new(vec![4, 5, 4, 3]));
    }

    #[test]
    #[should_panic(expected = "trajectory needs a starting value")]
    fn test_empty_trajectory_panics() {
        Trajectory::new(Vec::new());
    }

    #[test]
    fn test_parallel_sampling_is_reproducible() {
        let model = GamblersRuin::new(10, 20, 0.5).unwrap();
        let a = sample_paths_parallel(&model, 8, 77).unwrap();
        let b = sample_paths_parallel(&model, 8, 77).unwrap();
        assert_eq!(a, b);
    }
}
