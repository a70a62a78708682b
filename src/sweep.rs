use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::aggregator::TrialAggregator;
use crate::arm::sample_thetas;
use crate::config::{ExperimentConfig, ThetaSource};
use crate::convergence::classify;
use crate::error::{BanditError, BanditResult};
use crate::stats::CiHalfWidth;
use crate::strategy::StrategyKind;

// Seed stream for the one setup-time theta draw, distinct from the
// per-repeat streams the aggregator derives.
const THETA_SETUP_STREAM: u64 = 0xA076_1D64_78BD_642F;

/// The one parameter axis a sweep varies; everything else in the base
/// configuration stays fixed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SweepAxis {
    Horizon(Vec<usize>),
    Arms(Vec<usize>),
    Epsilon(Vec<f64>),
}

impl SweepAxis {
    pub fn len(&self) -> usize {
        match self {
            SweepAxis::Horizon(values) => values.len(),
            SweepAxis::Arms(values) => values.len(),
            SweepAxis::Epsilon(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label(&self) -> &'static str {
        match self {
            SweepAxis::Horizon(_) => "horizon",
            SweepAxis::Arms(_) => "K",
            SweepAxis::Epsilon(_) => "epsilon",
        }
    }
}

/// One point of the output series: swept value, mean per-step reward, its
/// CI half-width, and the convergence flag that drives the two-color
/// rendering downstream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub mean_reward: f64,
    pub ci_halfwidth: CiHalfWidth,
    pub converged: bool,
}

/// Iterates the axis in input order, one aggregated trial per value, and
/// assembles the series for the plotting collaborator. Emits data only;
/// rendering and persistence live elsewhere.
pub struct SweepDriver {
    base: ExperimentConfig,
    axis: SweepAxis,
}

impl SweepDriver {
    pub fn new(mut base: ExperimentConfig, axis: SweepAxis) -> BanditResult<SweepDriver> {
        base.validate()?;

        if axis.is_empty() {
            return Err(BanditError::InvalidParameter("sweep axis has no values".to_string()));
        }
        match &axis {
            SweepAxis::Arms(_) => {
                // An explicit theta vector pins K, so a K sweep needs the
                // normal theta source to redraw per value.
                if matches!(base.theta, ThetaSource::Explicit(_)) {
                    return Err(BanditError::InvalidParameter(
                        "K sweep requires a sampled theta source, not an explicit theta list".to_string(),
                    ));
                }
            }
            SweepAxis::Epsilon(_) => {
                if base.strategy != StrategyKind::EpsilonGreedy {
                    return Err(BanditError::InvalidParameter(
                        "epsilon sweep only applies to the epsilon-greedy strategy".to_string(),
                    ));
                }
            }
            SweepAxis::Horizon(_) => {}
        }

        // Horizon and epsilon sweeps vary one axis of a single bandit
        // problem, so a sampled theta source is resolved to one drawn
        // vector here at setup; only the K sweep redraws per value.
        if !matches!(axis, SweepAxis::Arms(_)) {
            if let ThetaSource::Normal { mean, std } = base.theta {
                let mut random = match base.seed {
                    Some(seed) => StdRng::seed_from_u64(seed ^ THETA_SETUP_STREAM),
                    None => StdRng::from_entropy(),
                };
                base.theta =
                    ThetaSource::Explicit(sample_thetas(base.arms, mean, std, &mut random)?);
            }
        }

        let driver = SweepDriver { base, axis };

        // Every swept value must yield a valid configuration before any
        // point runs.
        for index in 0..driver.axis.len() {
            let (_, config) = driver.point_config(index);
            config.validate()?;
        }

        Ok(driver)
    }

    pub fn run(&self) -> BanditResult<Vec<SweepPoint>> {
        info!(
            "sweeping {} over {} values, {} repeats each",
            self.axis.label(),
            self.axis.len(),
            self.base.repeats,
        );

        let mut series = Vec::with_capacity(self.axis.len());

        for index in 0..self.axis.len() {
            let (value, config) = self.point_config(index);
            let repeats = TrialAggregator::new(&config)?.run(index as u64)?;
            let ci_halfwidth =
                repeats.per_step_ci_halfwidth(config.ci_conf, config.critical_value)?;
            let converged = classify(ci_halfwidth, config.ci_threshold).is_converged();

            let point = SweepPoint {
                value,
                mean_reward: repeats.per_step_mean(),
                ci_halfwidth,
                converged,
            };
            info!(
                "{}={} mean_reward={:.4} ci_halfwidth={:?} converged={}",
                self.axis.label(),
                value,
                point.mean_reward,
                point.ci_halfwidth,
                point.converged,
            );
            series.push(point);
        }

        Ok(series)
    }

    fn point_config(&self, index: usize) -> (f64, ExperimentConfig) {
        let mut config = self.base.clone();
        let value = match &self.axis {
            SweepAxis::Horizon(values) => {
                config.horizon = values[index];
                values[index] as f64
            }
            SweepAxis::Arms(values) => {
                config.arms = values[index];
                values[index] as f64
            }
            SweepAxis::Epsilon(values) => {
                config.epsilon = values[index];
                values[index]
            }
        };
        (value, config)
    }
}
