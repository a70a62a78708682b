use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::arm::sample_thetas;
use crate::config::{CriticalValue, ExperimentConfig, ThetaSource};
use crate::error::BanditResult;
use crate::simulator::BanditSimulator;
use crate::stats::{self, CiHalfWidth};
use crate::strategy::Strategy;

// Seed stream offset separating theta draws from run draws.
const THETA_STREAM: u64 = 1 << 48;

/// Per-repeat total rewards for one parameter setting, kept only long
/// enough to compute the mean and CI half-width across repeats.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RepeatSeries {
    pub horizon: usize,
    pub outcomes: Vec<f64>,
}

impl RepeatSeries {
    pub fn mean(&self) -> f64 {
        stats::mean(&self.outcomes)
    }

    pub fn per_step_mean(&self) -> f64 {
        self.mean() / self.horizon as f64
    }

    pub fn ci_halfwidth(&self, conf: f64, kind: CriticalValue) -> BanditResult<CiHalfWidth> {
        stats::ci_halfwidth(&self.outcomes, conf, kind)
    }

    /// Half-width of the average per-round reward, the quantity the
    /// convergence threshold compares against.
    pub fn per_step_ci_halfwidth(&self, conf: f64, kind: CriticalValue) -> BanditResult<CiHalfWidth> {
        Ok(self.ci_halfwidth(conf, kind)?.scaled(1.0 / self.horizon as f64))
    }
}

/// Runs the simulator `repeats` times for one parameter setting, each
/// repeat on fresh estimators and its own derived RNG stream.
pub struct TrialAggregator<'a> {
    config: &'a ExperimentConfig,
}

impl<'a> TrialAggregator<'a> {
    pub fn new(config: &'a ExperimentConfig) -> BanditResult<TrialAggregator<'a>> {
        config.validate()?;
        Ok(TrialAggregator { config })
    }

    /// `point_index` distinguishes sweep points so every repeat in a sweep
    /// gets its own seed stream while the whole sweep stays reproducible.
    pub fn run(&self, point_index: u64) -> BanditResult<RepeatSeries> {
        let config = self.config;
        let strategy = Strategy::from_config(config);

        let samples = match config.theta {
            ThetaSource::Explicit(_) => 1,
            ThetaSource::Normal { .. } => config.theta_samples,
        };

        let mut outcomes = Vec::with_capacity(samples * config.repeats);

        for sample in 0..samples {
            let thetas = match &config.theta {
                ThetaSource::Explicit(thetas) => thetas.clone(),
                ThetaSource::Normal { mean, std } => {
                    let mut theta_random =
                        self.rng_for(point_index, THETA_STREAM + sample as u64);
                    sample_thetas(config.arms, *mean, *std, &mut theta_random)?
                }
            };

            for repeat in 0..config.repeats {
                let stream = (sample * config.repeats + repeat) as u64;
                let mut random = self.rng_for(point_index, stream);

                let mut simulator =
                    BanditSimulator::new(&thetas, strategy, config.prior_alpha, config.prior_beta);
                let history = simulator.run(config.horizon, &mut random)?;
                outcomes.push(history.total_reward());
            }
        }

        debug!(
            "trial done: point={} repeats={} mean_total={}",
            point_index,
            outcomes.len(),
            stats::mean(&outcomes),
        );

        Ok(RepeatSeries { horizon: config.horizon, outcomes })
    }

    fn rng_for(&self, point_index: u64, stream: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(
                seed ^ point_index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ stream.wrapping_mul(0xD1B5_4A32_D192_ED03),
            ),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::{CriticalValue, ExperimentConfig, ThetaSource};
    use crate::stats::CiHalfWidth;
    use crate::strategy::StrategyKind;

    use super::*;

    fn base_config() -> ExperimentConfig {
        ExperimentConfig {
            arms: 2,
            horizon: 200,
            strategy: StrategyKind::EpsilonGreedy,
            epsilon: 0.1,
            theta: ThetaSource::Explicit(vec![0.3, 0.7]),
            repeats: 20,
            seed: Some(1234),
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn one_outcome_per_repeat() {
        let config = base_config();
        let series = TrialAggregator::new(&config).unwrap().run(0).unwrap();

        assert_eq!(series.outcomes.len(), config.repeats);
        assert_eq!(series.horizon, config.horizon);
        assert!(series.outcomes.iter().all(|&total| total >= 0.0 && total <= 200.0));
    }

    #[test]
    fn normal_theta_source_pools_all_samples() {
        let config = ExperimentConfig {
            theta: ThetaSource::Normal { mean: 0.5, std: 0.1 },
            theta_samples: 3,
            repeats: 5,
            horizon: 50,
            ..base_config()
        };
        let series = TrialAggregator::new(&config).unwrap().run(0).unwrap();
        assert_eq!(series.outcomes.len(), 15);
    }

    #[test]
    fn single_repeat_has_undefined_halfwidth() {
        let config = ExperimentConfig { repeats: 1, ..base_config() };
        let series = TrialAggregator::new(&config).unwrap().run(0).unwrap();

        assert_eq!(series.outcomes.len(), 1);
        assert_eq!(
            series.ci_halfwidth(0.95, CriticalValue::StudentT).unwrap(),
            CiHalfWidth::Undefined,
        );
        // The mean is still well defined.
        assert_eq!(series.mean(), series.outcomes[0]);
    }

    #[test]
    fn seeded_trials_are_reproducible() {
        let config = base_config();
        let aggregator = TrialAggregator::new(&config).unwrap();

        assert_eq!(aggregator.run(3).unwrap(), aggregator.run(3).unwrap());
    }

    #[test]
    fn repeats_are_independent_streams() {
        let config = base_config();
        let series = TrialAggregator::new(&config).unwrap().run(0).unwrap();

        let first = series.outcomes[0];
        assert!(series.outcomes.iter().any(|&total| total != first));
    }

    #[test]
    fn different_points_draw_different_streams() {
        let config = base_config();
        let aggregator = TrialAggregator::new(&config).unwrap();

        assert_ne!(aggregator.run(0).unwrap(), aggregator.run(1).unwrap());
    }

    #[test]
    fn halfwidth_shrinks_with_more_repeats() {
        let few = ExperimentConfig { repeats: 5, ..base_config() };
        let many = ExperimentConfig { repeats: 80, ..base_config() };

        let narrow = |config: &ExperimentConfig| {
            TrialAggregator::new(config)
                .unwrap()
                .run(0)
                .unwrap()
                .per_step_ci_halfwidth(0.95, CriticalValue::StudentT)
                .unwrap()
                .value()
                .unwrap()
        };

        assert!(narrow(&many) < narrow(&few));
    }

    #[test]
    fn per_step_mean_normalizes_by_horizon() {
        let series = RepeatSeries { horizon: 100, outcomes: vec![60.0, 80.0] };
        assert_eq!(series.mean(), 70.0);
        assert_eq!(series.per_step_mean(), 0.7);
    }
}
