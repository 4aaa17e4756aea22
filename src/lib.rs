pub mod config;
pub mod engine;
pub mod error;
pub mod service;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::{Config, EngineLimits};
pub use engine::{converge, converge_detailed, Convergence, ConvergenceEngine};
pub use error::{ConvergeError, Error, Result, ValidationError};
pub use service::{ConnectivityService, ReportOutcome};
pub use types::*;
