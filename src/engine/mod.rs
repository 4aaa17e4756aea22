pub mod aggregator;
pub mod convergence;
pub mod partition;
pub mod resolver;

pub use convergence::{converge, converge_detailed, Convergence, ConvergenceEngine};
