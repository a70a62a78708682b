use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Beta;

use crate::arm::ArmEstimator;

use super::SelectionStrategy;

#[derive(Clone, Copy, Debug, Default)]
pub struct ThompsonSampling;

impl SelectionStrategy for ThompsonSampling {
    fn select_arm(&self, estimators: &[ArmEstimator], _round: usize, random: &mut impl Rng) -> usize {
        let mut max_arm = 0;
        let mut max_sample = f64::NEG_INFINITY;

        for (arm, estimator) in estimators.iter().enumerate() {
            // Posterior counts start at a validated positive prior and only
            // ever grow, so the distribution is always constructible.
            let beta = Beta::new(estimator.alpha, estimator.beta).expect("Wrong a or b");
            let sample = beta.sample(random);

            // Strict comparison from index 0 keeps exact ties on the
            // lowest arm, so seeded runs replay identically.
            if sample > max_sample {
                max_arm = arm;
                max_sample = sample;
            }
        }

        max_arm
    }
}
