use thiserror::Error;

/// Failures of the convergence engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvergeError {
    #[error("cannot converge an empty batch of observations")]
    EmptyBatch,
}

/// Reasons a raw report is refused at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("observation {index} has a blank or missing channel")]
    BlankChannel { index: usize },

    #[error("observation {index} has unrecognized state tag {tag:?}")]
    UnknownState { index: usize, tag: String },

    #[error("batch of {len} observations exceeds the limit of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Converge(#[from] ConvergeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
