use rand::Rng;

use crate::arm::ArmEstimator;

use super::{best_estimated_arm, SelectionStrategy};

#[derive(Clone, Copy, Debug)]
pub struct EpsilonGreedy {
    pub epsilon: f64,
}

impl SelectionStrategy for EpsilonGreedy {
    fn select_arm(&self, estimators: &[ArmEstimator], _round: usize, random: &mut impl Rng) -> usize {
        // epsilon == 0 must not consume a draw: pure greedy has to replay
        // identically to a run that never explores.
        if self.epsilon > 0.0 && random.gen::<f64>() < self.epsilon {
            random.gen_range(0..estimators.len())
        } else {
            best_estimated_arm(estimators)
        }
    }
}
