use crate::parallel::ParallelError;

/// An error type for the hough module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HoughError {
    /// A detection parameter is out of range or the input mask is degenerate.
    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParameter(&'static str, String),

    /// The accumulation could not be scheduled.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
