mod epsilon_greedy;
mod thompson;
mod ucb;

use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

pub use epsilon_greedy::EpsilonGreedy;
pub use thompson::ThompsonSampling;
pub use ucb::Ucb;

use crate::arm::ArmEstimator;
use crate::config::ExperimentConfig;
use crate::error::{BanditError, BanditResult};

/// A selection policy: maps the current estimator state (plus the 1-indexed
/// round) to an arm index. Implementations read the estimators but never
/// mutate them.
pub trait SelectionStrategy {
    fn select_arm(&self, estimators: &[ArmEstimator], round: usize, random: &mut impl Rng) -> usize;
}

/// Strategy selector as it arrives from configuration. Parsed exactly once
/// at setup; an unrecognized name fails here, never mid-run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StrategyKind {
    EpsilonGreedy,
    Ucb,
    Thompson,
}

impl FromStr for StrategyKind {
    type Err = BanditError;

    fn from_str(s: &str) -> BanditResult<StrategyKind> {
        match s {
            "epsilon-greedy" | "epsilon_greedy" | "greedy" => Ok(StrategyKind::EpsilonGreedy),
            "ucb" => Ok(StrategyKind::Ucb),
            "thompson" | "ts" => Ok(StrategyKind::Thompson),
            other => Err(BanditError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Tagged-variant dispatch over the three policies. Built once per run from
/// the validated configuration.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    EpsilonGreedy(EpsilonGreedy),
    Ucb(Ucb),
    Thompson(ThompsonSampling),
}

impl Strategy {
    pub fn from_config(config: &ExperimentConfig) -> Strategy {
        match config.strategy {
            StrategyKind::EpsilonGreedy => Strategy::EpsilonGreedy(EpsilonGreedy { epsilon: config.epsilon }),
            StrategyKind::Ucb => Strategy::Ucb(Ucb { c: config.ucb_c }),
            StrategyKind::Thompson => Strategy::Thompson(ThompsonSampling),
        }
    }
}

impl SelectionStrategy for Strategy {
    fn select_arm(&self, estimators: &[ArmEstimator], round: usize, random: &mut impl Rng) -> usize {
        match self {
            Strategy::EpsilonGreedy(s) => s.select_arm(estimators, round, random),
            Strategy::Ucb(s) => s.select_arm(estimators, round, random),
            Strategy::Thompson(s) => s.select_arm(estimators, round, random),
        }
    }
}

/// Argmax over estimated means, ties broken by lowest arm index.
pub fn best_estimated_arm(estimators: &[ArmEstimator]) -> usize {
    let mut best_arm = 0;
    let mut best_mean = f64::NEG_INFINITY;

    for (arm, estimator) in estimators.iter().enumerate() {
        if estimator.estimated_mean > best_mean {
            best_arm = arm;
            best_mean = estimator.estimated_mean;
        }
    }

    best_arm
}
