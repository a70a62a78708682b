use thiserror::Error;

pub type BanditResult<T> = Result<T, BanditError>;

/// Everything that can go wrong before a run starts. Once a run is in
/// flight the core is deterministic given its draws, so there is nothing
/// left to fail mid-run.
#[derive(Debug, Error)]
pub enum BanditError {
    #[error("unknown strategy {0:?}, expected one of: epsilon-greedy, ucb, thompson")]
    UnknownStrategy(String),

    #[error("theta has {got} entries but K = {expected}")]
    ThetaLengthMismatch { expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    InvalidParameter(String),

    #[error("simulator already completed, reset it before running again")]
    RunAlreadyCompleted,

    #[error("degenerate distribution: {0}")]
    Distribution(String),
}
