use std::env;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BanditError, BanditResult};
use crate::strategy::StrategyKind;

pub fn parse_env<Value>(key: &str) -> Option<Value>
where
    Value: FromStr,
    <Value as FromStr>::Err: std::fmt::Debug,
{
    env::var(key).map(|s| s.parse().expect("ExperimentConfig: can't parse env variable")).ok()
}

pub fn parse_env_list<Value>(key: &str) -> Option<Vec<Value>>
where
    Value: FromStr,
    <Value as FromStr>::Err: std::fmt::Debug,
{
    env::var(key).ok().map(|s| {
        s.split_whitespace()
            .map(|v| v.parse().expect("ExperimentConfig: can't parse env variable list"))
            .collect()
    })
}

/// Where the per-arm true parameters come from: supplied explicitly, or
/// drawn once at setup from Normal(mean, std) clamped to [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ThetaSource {
    Explicit(Vec<f64>),
    Normal { mean: f64, std: f64 },
}

/// Which critical value the confidence interval uses. Student-t is exact
/// for small repeat counts; the normal approximation is an explicit opt-in,
/// never a silent fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CriticalValue {
    StudentT,
    Normal,
}

impl FromStr for CriticalValue {
    type Err = BanditError;

    fn from_str(s: &str) -> BanditResult<CriticalValue> {
        match s {
            "student-t" | "student_t" | "t" => Ok(CriticalValue::StudentT),
            "normal" | "z" => Ok(CriticalValue::Normal),
            other => Err(BanditError::InvalidParameter(
                format!("unknown critical value kind {:?}, expected student-t or normal", other),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentConfig {
    pub arms: usize,
    pub horizon: usize,
    pub strategy: StrategyKind,
    pub epsilon: f64,
    pub ucb_c: f64,
    pub prior_alpha: f64,
    pub prior_beta: f64,
    pub theta: ThetaSource,
    pub theta_samples: usize,
    pub repeats: usize,
    pub ci_conf: f64,
    pub ci_threshold: f64,
    pub critical_value: CriticalValue,
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> ExperimentConfig {
        ExperimentConfig {
            arms: 10,
            horizon: 6500,
            strategy: StrategyKind::EpsilonGreedy,
            epsilon: 0.1,
            ucb_c: 2.0,
            prior_alpha: 1.0,
            prior_beta: 1.0,
            theta: ThetaSource::Normal { mean: 0.5, std: 0.1 },
            theta_samples: 1,
            repeats: 30,
            ci_conf: 0.95,
            ci_threshold: 0.01,
            critical_value: CriticalValue::StudentT,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_env() -> BanditResult<ExperimentConfig> {
        let defaults = ExperimentConfig::default();

        let theta = if let Some(thetas) = parse_env_list::<f64>("BANDIT_THETA") {
            ThetaSource::Explicit(thetas)
        } else {
            ThetaSource::Normal {
                mean: parse_env("BANDIT_THETA_MEAN").unwrap_or(0.5),
                std: parse_env("BANDIT_THETA_STD").unwrap_or(0.1),
            }
        };

        let strategy = match env::var("BANDIT_STRATEGY") {
            Ok(name) => name.parse()?,
            Err(_) => defaults.strategy,
        };

        let critical_value = match env::var("BANDIT_CRITICAL") {
            Ok(name) => name.parse()?,
            Err(_) => defaults.critical_value,
        };

        let config = ExperimentConfig {
            arms: parse_env("BANDIT_K").unwrap_or(defaults.arms),
            horizon: parse_env("BANDIT_HORIZON").unwrap_or(defaults.horizon),
            strategy,
            epsilon: parse_env("BANDIT_EPSILON").unwrap_or(defaults.epsilon),
            ucb_c: parse_env("BANDIT_UCB_C").unwrap_or(defaults.ucb_c),
            prior_alpha: parse_env("BANDIT_PRIOR_ALPHA").unwrap_or(defaults.prior_alpha),
            prior_beta: parse_env("BANDIT_PRIOR_BETA").unwrap_or(defaults.prior_beta),
            theta,
            theta_samples: parse_env("BANDIT_THETA_SAMPLES").unwrap_or(defaults.theta_samples),
            repeats: parse_env("BANDIT_REPEATS").unwrap_or(defaults.repeats),
            ci_conf: parse_env("BANDIT_CI_CONF").unwrap_or(defaults.ci_conf),
            ci_threshold: parse_env("BANDIT_CI_THRESHOLD").unwrap_or(defaults.ci_threshold),
            critical_value,
            seed: parse_env("BANDIT_SEED"),
        };

        config.validate()?;
        Ok(config)
    }

    /// All parameter checks happen here, before any run starts.
    pub fn validate(&self) -> BanditResult<()> {
        if self.arms == 0 {
            return Err(BanditError::InvalidParameter("K must be positive".to_string()));
        }
        if self.horizon == 0 {
            return Err(BanditError::InvalidParameter("horizon must be positive".to_string()));
        }
        if self.repeats == 0 {
            return Err(BanditError::InvalidParameter("repeats must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(BanditError::InvalidParameter(
                format!("epsilon must be in [0, 1], got {}", self.epsilon),
            ));
        }
        if self.ucb_c < 0.0 {
            return Err(BanditError::InvalidParameter(
                format!("ucb_c must be non-negative, got {}", self.ucb_c),
            ));
        }
        if self.prior_alpha <= 0.0 || self.prior_beta <= 0.0 {
            return Err(BanditError::InvalidParameter(
                format!("Beta prior must be positive, got ({}, {})", self.prior_alpha, self.prior_beta),
            ));
        }
        if !(self.ci_conf > 0.0 && self.ci_conf < 1.0) {
            return Err(BanditError::InvalidParameter(
                format!("ci_conf must be in (0, 1), got {}", self.ci_conf),
            ));
        }
        if self.ci_threshold <= 0.0 {
            return Err(BanditError::InvalidParameter(
                format!("ci_threshold must be positive, got {}", self.ci_threshold),
            ));
        }
        match &self.theta {
            ThetaSource::Explicit(thetas) => {
                if thetas.len() != self.arms {
                    return Err(BanditError::ThetaLengthMismatch {
                        expected: self.arms,
                        got: thetas.len(),
                    });
                }
                if let Some(bad) = thetas.iter().find(|th| !(0.0..=1.0).contains(*th)) {
                    return Err(BanditError::InvalidParameter(
                        format!("theta entries must be in [0, 1], got {}", bad),
                    ));
                }
            }
            ThetaSource::Normal { std, .. } => {
                if *std <= 0.0 {
                    return Err(BanditError::InvalidParameter(
                        format!("theta std must be positive, got {}", std),
                    ));
                }
                if self.theta_samples == 0 {
                    return Err(BanditError::InvalidParameter(
                        "theta_samples must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
