pub mod aggregator;
pub mod arm;
pub mod config;
pub mod convergence;
pub mod error;
pub mod reward;
pub mod simulator;
pub mod stats;
pub mod strategy;
pub mod sweep;
