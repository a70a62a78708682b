use rand::Rng;

/// Draws one stochastic reward for an arm with the given true parameter.
/// Every call is an independent draw.
pub trait RewardSource {
    fn sample(&self, theta: f64, random: &mut impl Rng) -> f64;
}

/// Bernoulli rewards: 1 with probability theta, else 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct BernoulliReward;

impl RewardSource for BernoulliReward {
    fn sample(&self, theta: f64, random: &mut impl Rng) -> f64 {
        if random.gen::<f64>() < theta {
            1.0
        } else {
            0.0
        }
    }
}
