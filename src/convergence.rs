use serde::Serialize;

use crate::stats::CiHalfWidth;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Convergence {
    Converged,
    NotConverged,
}

impl Convergence {
    pub fn is_converged(self) -> bool {
        self == Convergence::Converged
    }
}

/// A sweep point converges when the half-width of its average per-round
/// reward is at or below the threshold. An undefined half-width (fewer
/// than two repeats) never converges.
pub fn classify(per_step_halfwidth: CiHalfWidth, threshold: f64) -> Convergence {
    match per_step_halfwidth {
        CiHalfWidth::Defined(halfwidth) if halfwidth <= threshold => Convergence::Converged,
        _ => Convergence::NotConverged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_interval_converges() {
        assert_eq!(classify(CiHalfWidth::Defined(0.008), 0.01), Convergence::Converged);
    }

    #[test]
    fn wide_interval_does_not_converge() {
        assert_eq!(classify(CiHalfWidth::Defined(0.02), 0.01), Convergence::NotConverged);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(classify(CiHalfWidth::Defined(0.01), 0.01), Convergence::Converged);
    }

    #[test]
    fn undefined_halfwidth_never_converges() {
        assert_eq!(classify(CiHalfWidth::Undefined, 0.01), Convergence::NotConverged);
    }
}
