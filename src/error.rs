//! Error types returned by the fallible parts of the crate.
//!
//! The curve engine itself is total over its inputs; these errors are raised by the
//! checks callers run before handing points to it, and by option handling.

use thiserror::Error;

/// Violated preconditions on control points, iteration counts or algorithm ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Not enough control points to generate a curve from
    #[error("please add at least {required} points, got {actual}")]
    NotEnoughPoints {
        /// Minimum number of control points
        required: usize,
        /// Number of control points present
        actual: usize,
    },

    /// Iteration or sample count below one
    #[error("the number of iterations must be at least 1, got {0}")]
    InvalidIterations(usize),

    /// Algorithm id outside of `0..=2`
    #[error("unknown algorithm id {0}")]
    UnknownAlgorithm(u8),

    /// Control point index past the end of the control list
    #[error("there is no control point {index}, only {len} exist")]
    NoSuchPoint {
        /// Requested index
        index: usize,
        /// Number of control points present
        len: usize,
    },
}

/// Problems loading, storing or validating [`Options`](crate::options::Options)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Delay between emitted steps is negative or not finite
    #[error("step delay must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidStepDelay(f64),

    /// Duration of a step animation is not positive or not finite
    #[error("step duration must be a finite, positive number of seconds, got {0}")]
    InvalidStepDuration(f64),

    /// Invalid curve related option
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Options file isn't valid TOML or has wrong types
    #[error("failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),

    /// Options couldn't be turned into TOML
    #[error("failed to serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Options file couldn't be read or written
    #[error("failed to access options file: {0}")]
    Io(#[from] std::io::Error),
}
