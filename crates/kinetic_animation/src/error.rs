//! Tween error types

use thiserror::Error;

/// Errors raised while building a tween
///
/// Frame updates never return these; problems found mid-animation are logged
/// and skipped instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// A phase duration was NaN, infinite or negative
    #[error("Invalid duration: {0}")]
    InvalidDuration(f64),

    /// A target path does not address a number in the animated object
    #[error("Property path does not resolve to a number: {0}")]
    UnresolvedPath(String),

    /// A target leaf is neither a number nor a non-empty list of numbers
    #[error("Target value at {0} is not numeric")]
    NonNumericTarget(String),

    /// The scheduler behind a handle has been dropped
    #[error("Tween scheduler is no longer available")]
    SchedulerUnavailable,

    /// No default scheduler has been installed
    #[error("No default tween scheduler installed")]
    NoDefaultScheduler,

    /// `set_default_scheduler` was called twice
    #[error("Default tween scheduler already installed")]
    DefaultSchedulerAlreadySet,
}

/// Result type for tween construction
pub type Result<T> = std::result::Result<T, TweenError>;
