//! Biased ±1 random walk with absorbing barriers
//!
//! The gambler starts with `initial_money` and bets one unit at a time,
//! winning each bet with probability `p`. The walk is absorbed at 0 (ruin)
//! or at `target` (success).
//!
//! For `0 < p < 1` a walk terminates almost surely, but its length is
//! unbounded: the expected number of bets grows like `target²` for a fair
//! game, and a tiny bias towards the far barrier can make single walks very
//! long. For `p = 0` or `p = 1` the walk is deterministic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::error::{Result, RuinError};

/// Barrier at which a walk was absorbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorption {
    /// Capital reached 0
    Ruin,
    /// Capital reached the target
    Target,
}

/// Outcome of one complete walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Barrier that stopped the walk
    pub absorbed_at: Absorption,
    /// Number of bets placed before absorption
    pub steps: u64,
}

impl WalkOutcome {
    pub fn is_ruin(&self) -> bool {
        self.absorbed_at == Absorption::Ruin
    }
}

/// Validated parameters of a gambler's ruin walk
///
/// Parameters are immutable once constructed, so every walk generated from
/// the same model obeys `0 < initial_money < target` and `0 <= p <= 1`.
#[derive(Debug, Clone)]
pub struct GamblersRuin {
    initial_money: u64,
    target: u64,
    p: f64,
    /// Outcome distribution of a single bet
    bet: Bernoulli,
}

impl GamblersRuin {
    /// Creates a new walk model
    ///
    /// # Arguments
    /// * `initial_money` - Starting capital, strictly between 0 and `target`
    /// * `target` - Capital at which the gambler stops and wins
    /// * `p` - Probability of winning a single bet, in [0, 1]
    ///
    /// # Errors
    /// Returns [`RuinError::InvalidParameter`] when a walk with these
    /// parameters would start on (or beyond) a barrier, or when `p` is not
    /// a probability.
    ///
    /// # Example
    /// ```
    /// use gamblers_ruin::GamblersRuin;
    ///
    /// let model = GamblersRuin::new(10, 50, 0.3).unwrap();
    /// assert_eq!(model.target(), 50);
    /// assert!(GamblersRuin::new(50, 50, 0.3).is_err());
    /// ```
    pub fn new(initial_money: u64, target: u64, p: f64) -> Result<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(RuinError::invalid(
                "p",
                format!("win probability must lie in [0, 1], got {}", p),
            ));
        }
        if target == 0 {
            return Err(RuinError::invalid("target", "target must be positive"));
        }
        if initial_money == 0 {
            return Err(RuinError::invalid(
                "initial_money",
                "walk would start already ruined",
            ));
        }
        if initial_money >= target {
            return Err(RuinError::invalid(
                "initial_money",
                format!(
                    "initial money {} must be below the target {}",
                    initial_money, target
                ),
            ));
        }

        let bet = Bernoulli::new(p).map_err(|e| RuinError::invalid("p", e.to_string()))?;

        Ok(Self {
            initial_money,
            target,
            p,
            bet,
        })
    }

    pub fn initial_money(&self) -> u64 {
        self.initial_money
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// True once the capital sits on either barrier
    pub fn is_absorbed(&self, money: u64) -> bool {
        money == 0 || money >= self.target
    }

    /// Places one bet: `money + 1` with probability `p`, otherwise `money - 1`
    ///
    /// `money` must lie strictly between the barriers.
    pub fn step<R: Rng>(&self, rng: &mut R, money: u64) -> u64 {
        debug_assert!(!self.is_absorbed(money), "stepping an absorbed walk");
        if self.bet.sample(rng) {
            money + 1
        } else {
            money - 1
        }
    }

    /// Runs one walk until absorption and reports where and when it stopped
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> WalkOutcome {
        let mut money = self.initial_money;
        let mut steps = 0u64;

        while !self.is_absorbed(money) {
            money = self.step(rng, money);
            steps += 1;
        }

        let absorbed_at = if money == 0 {
            Absorption::Ruin
        } else {
            Absorption::Target
        };

        WalkOutcome { absorbed_at, steps }
    }

    /// Runs one walk and records every capital value
    ///
    /// # Returns
    /// Capital after 0, 1, 2, ... bets, starting with `initial_money` and
    /// ending with the absorbing value (0 or `target`)
    ///
    /// # Example
    /// ```
    /// use gamblers_ruin::GamblersRuin;
    ///
    /// let model = GamblersRuin::new(3, 6, 1.0).unwrap();
    /// let mut rng = rand::thread_rng();
    /// assert_eq!(model.generate_path(&mut rng), vec![3, 4, 5, 6]);
    /// ```
    pub fn generate_path<R: Rng>(&self, rng: &mut R) -> Vec<u64> {
        let mut money = self.initial_money;
        let mut path = vec![money];

        while !self.is_absorbed(money) {
            money = self.step(rng, money);
            path.push(money);
        }

        path
    }
}

/// Generator for trial `trial` of a run seeded with `seed`
///
/// Every trial gets its own ChaCha stream, so results do not depend on the
/// order or the thread in which trials execute.
pub fn trial_rng(seed: u64, trial: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            GamblersRuin::new(0, 50, 0.5),
            Err(RuinError::InvalidParameter { name: "initial_money", .. })
        ));
        assert!(matches!(
            GamblersRuin::new(50, 50, 0.5),
            Err(RuinError::InvalidParameter { name: "initial_money", .. })
        ));
        assert!(matches!(
            GamblersRuin::new(60, 50, 0.5),
            Err(RuinError::InvalidParameter { name: "initial_money", .. })
        ));
        assert!(matches!(
            GamblersRuin::new(0, 0, 0.5),
            Err(RuinError::InvalidParameter { name: "target", .. })
        ));
        for p in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GamblersRuin::new(10, 50, p),
                Err(RuinError::InvalidParameter { name: "p", .. })
            ));
        }
    }

    #[test]
    fn test_accepts_extreme_probabilities() {
        assert!(GamblersRuin::new(1, 2, 0.0).is_ok());
        assert!(GamblersRuin::new(1, 2, 1.0).is_ok());
    }

    #[test]
    fn test_certain_win_walks_straight_to_target() {
        let model = GamblersRuin::new(10, 50, 1.0).unwrap();
        let outcome = model.simulate(&mut test_rng());
        assert_eq!(outcome.absorbed_at, Absorption::Target);
        assert_eq!(outcome.steps, 40);
    }

    #[test]
    fn test_certain_loss_walks_straight_to_ruin() {
        let model = GamblersRuin::new(10, 50, 0.0).unwrap();
        let outcome = model.simulate(&mut test_rng());
        assert!(outcome.is_ruin());
        assert_eq!(outcome.steps, 10);
    }

    #[test]
    fn test_path_is_unit_step_walk_between_barriers() {
        let model = GamblersRuin::new(5, 10, 0.5).unwrap();
        let mut rng = test_rng();

        for _ in 0..200 {
            let path = model.generate_path(&mut rng);
            assert_eq!(path[0], 5);

            let last = *path.last().unwrap();
            assert!(last == 0 || last == 10);
            assert!(path[..path.len() - 1].iter().all(|&m| m > 0 && m < 10));
            assert!(path.windows(2).all(|w| w[0].abs_diff(w[1]) == 1));
        }
    }

    #[test]
    fn test_path_and_outcome_agree_for_same_stream() {
        let model = GamblersRuin::new(7, 20, 0.45).unwrap();

        let outcome = model.simulate(&mut trial_rng(9, 3));
        let path = model.generate_path(&mut trial_rng(9, 3));

        assert_eq!(outcome.steps as usize, path.len() - 1);
        assert_eq!(outcome.is_ruin(), *path.last().unwrap() == 0);
    }

    #[test]
    fn test_trial_rng_streams_differ() {
        let model = GamblersRuin::new(25, 50, 0.5).unwrap();
        let a = model.generate_path(&mut trial_rng(1, 0));
        let b = model.generate_path(&mut trial_rng(1, 1));
        let a_again = model.generate_path(&mut trial_rng(1, 0));

        assert_eq!(a, a_again);
        assert_ne!(a, b);
    }
}
