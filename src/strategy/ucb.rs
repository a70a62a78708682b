use rand::Rng;

use crate::arm::ArmEstimator;

use super::SelectionStrategy;

#[derive(Clone, Copy, Debug)]
pub struct Ucb {
    pub c: f64,
}

impl SelectionStrategy for Ucb {
    fn select_arm(&self, estimators: &[ArmEstimator], round: usize, _random: &mut impl Rng) -> usize {
        let t_ln = (round as f64).ln();

        let mut max_score_arm = 0;
        let mut max_score = f64::NEG_INFINITY;

        for (arm, estimator) in estimators.iter().enumerate() {
            // Every arm gets pulled once before the formula applies, so
            // pulls is never zero in the denominator.
            if estimator.pulls == 0 {
                return arm;
            }

            let score = estimator.estimated_mean + self.c * (t_ln / estimator.pulls as f64).sqrt();

            if score > max_score {
                max_score_arm = arm;
                max_score = score;
            }
        }

        max_score_arm
    }
}
