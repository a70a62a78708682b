use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::config::CriticalValue;
use crate::error::{BanditError, BanditResult};

/// Half-width of a confidence interval around a sample mean. With fewer
/// than two observations there is no interval, and that is an explicit
/// state here rather than a silent 0.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum CiHalfWidth {
    Undefined,
    Defined(f64),
}

impl CiHalfWidth {
    pub fn value(self) -> Option<f64> {
        match self {
            CiHalfWidth::Undefined => None,
            CiHalfWidth::Defined(halfwidth) => Some(halfwidth),
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, CiHalfWidth::Defined(_))
    }

    /// Scale a defined half-width, e.g. total reward down to per-step.
    pub fn scaled(self, factor: f64) -> CiHalfWidth {
        match self {
            CiHalfWidth::Undefined => CiHalfWidth::Undefined,
            CiHalfWidth::Defined(halfwidth) => CiHalfWidth::Defined(halfwidth * factor),
        }
    }
}

pub fn mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        0.0
    } else {
        vals.iter().sum::<f64>() / vals.len() as f64
    }
}

/// Sample standard deviation (n - 1 denominator). Callers guarantee
/// `vals.len() >= 2`.
pub fn sample_std(vals: &[f64]) -> f64 {
    let n = vals.len() as f64;
    let m = mean(vals);
    let variance = vals.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Two-sided critical value at the given confidence level, from Student-t
/// with `df` degrees of freedom or the standard normal, per configuration.
pub fn critical_value(conf: f64, df: usize, kind: CriticalValue) -> BanditResult<f64> {
    let p = 1.0 - (1.0 - conf) / 2.0;

    let crit = match kind {
        CriticalValue::StudentT => StudentsT::new(0.0, 1.0, df as f64)
            .map_err(|e| BanditError::Distribution(e.to_string()))?
            .inverse_cdf(p),
        CriticalValue::Normal => Normal::new(0.0, 1.0)
            .map_err(|e| BanditError::Distribution(e.to_string()))?
            .inverse_cdf(p),
    };

    Ok(crit)
}

/// CI half-width for the mean of `vals`: critical value times the standard
/// error. `Undefined` below two observations.
pub fn ci_halfwidth(vals: &[f64], conf: f64, kind: CriticalValue) -> BanditResult<CiHalfWidth> {
    if vals.len() < 2 {
        return Ok(CiHalfWidth::Undefined);
    }

    let se = sample_std(vals) / (vals.len() as f64).sqrt();
    let crit = critical_value(conf, vals.len() - 1, kind)?;

    Ok(CiHalfWidth::Defined(crit * se))
}
