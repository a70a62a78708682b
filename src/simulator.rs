use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::arm::{Arm, ArmEstimator};
use crate::error::{BanditError, BanditResult};
use crate::reward::{BernoulliReward, RewardSource};
use crate::strategy::{best_estimated_arm, SelectionStrategy, Strategy};

/// One (round, chosen arm, reward) observation, with the running total so
/// far for cheap per-step inspection downstream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    pub arm: usize,
    pub reward: f64,
    pub cumulative_reward: f64,
}

/// Ordered record of one full run. Frozen once the run completes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunHistory {
    rounds: Vec<RoundRecord>,
}

impl RunHistory {
    fn with_capacity(horizon: usize) -> RunHistory {
        RunHistory { rounds: Vec::with_capacity(horizon) }
    }

    fn push(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn total_reward(&self) -> f64 {
        self.rounds.last().map_or(0.0, |record| record.cumulative_reward)
    }

    pub fn average_reward(&self) -> f64 {
        if self.rounds.is_empty() {
            0.0
        } else {
            self.total_reward() / self.rounds.len() as f64
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Completed,
}

/// Drives one run: per round, ask the strategy for an arm, draw a reward,
/// fold it into that arm's estimator, record the step. A completed
/// simulator refuses further runs until `reset`.
pub struct BanditSimulator {
    arms: Vec<Arm>,
    estimators: Vec<ArmEstimator>,
    strategy: Strategy,
    reward_source: BernoulliReward,
    prior_alpha: f64,
    prior_beta: f64,
    state: RunState,
    history: RunHistory,
}

impl BanditSimulator {
    pub fn new(thetas: &[f64], strategy: Strategy, prior_alpha: f64, prior_beta: f64) -> BanditSimulator {
        BanditSimulator {
            arms: thetas.iter().map(|&theta| Arm::new(theta)).collect(),
            estimators: vec![ArmEstimator::new(prior_alpha, prior_beta); thetas.len()],
            strategy,
            reward_source: BernoulliReward,
            prior_alpha,
            prior_beta,
            state: RunState::Initialized,
            history: RunHistory::default(),
        }
    }

    pub fn run(&mut self, horizon: usize, random: &mut impl Rng) -> BanditResult<&RunHistory> {
        if self.state != RunState::Initialized {
            return Err(BanditError::RunAlreadyCompleted);
        }

        self.state = RunState::Running;
        self.history = RunHistory::with_capacity(horizon);
        let mut cumulative_reward = 0.0;

        for round in 1..=horizon {
            let arm = self.strategy.select_arm(&self.estimators, round, random);
            let reward = self.reward_source.sample(self.arms[arm].theta, random);

            self.estimators[arm].observe(reward);
            cumulative_reward += reward;
            self.history.push(RoundRecord { round, arm, reward, cumulative_reward });
        }

        self.state = RunState::Completed;
        debug!(
            "run completed: horizon={} total_reward={} best_arm={}",
            horizon,
            cumulative_reward,
            self.best_arm(),
        );

        Ok(&self.history)
    }

    /// Back to `Initialized`: fresh estimators at their prior, empty
    /// history. The arms keep their true parameters.
    pub fn reset(&mut self) {
        for estimator in self.estimators.iter_mut() {
            estimator.reset(self.prior_alpha, self.prior_beta);
        }
        self.history = RunHistory::default();
        self.state = RunState::Initialized;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn estimators(&self) -> &[ArmEstimator] {
        &self.estimators
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    /// Arm with the highest estimated mean, lowest index on ties.
    pub fn best_arm(&self) -> usize {
        best_estimated_arm(&self.estimators)
    }
}
