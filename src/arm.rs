use rand::distributions::Distribution;
use rand::Rng;
use serde::Serialize;
use statrs::distribution::Normal;

use crate::error::{BanditError, BanditResult};

/// One selectable arm. `theta` is the true success probability, fixed for
/// the arm's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arm {
    pub theta: f64,
}

impl Arm {
    pub fn new(theta: f64) -> Arm {
        Arm { theta }
    }
}

/// Running statistics for one arm, owned by a single simulator run.
///
/// `estimated_mean` is the incremental average of observed rewards;
/// `alpha`/`beta` are the Beta posterior counts used by Thompson sampling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ArmEstimator {
    pub pulls: usize,
    pub estimated_mean: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl ArmEstimator {
    pub fn new(prior_alpha: f64, prior_beta: f64) -> ArmEstimator {
        ArmEstimator {
            pulls: 0,
            estimated_mean: 0.0,
            alpha: prior_alpha,
            beta: prior_beta,
        }
    }

    /// Fold one observed reward into the running statistics.
    pub fn observe(&mut self, reward: f64) {
        self.pulls += 1;
        self.estimated_mean += (reward - self.estimated_mean) / self.pulls as f64;

        // Bernoulli posterior update: success bumps alpha, failure beta.
        let win = (reward == 1.0) as u8 as f64;
        self.alpha += win;
        self.beta += 1.0 - win;
    }

    pub fn reset(&mut self, prior_alpha: f64, prior_beta: f64) {
        *self = ArmEstimator::new(prior_alpha, prior_beta);
    }
}

/// Draw K true parameters from Normal(mean, std), clamped to [0, 1].
pub fn sample_thetas(k: usize, mean: f64, std: f64, random: &mut impl Rng) -> BanditResult<Vec<f64>> {
    let normal = Normal::new(mean, std).map_err(|e| BanditError::Distribution(e.to_string()))?;

    let thetas = (0..k)
        .map(|_| normal.sample(random).clamp(0.0, 1.0))
        .collect();

    Ok(thetas)
}
