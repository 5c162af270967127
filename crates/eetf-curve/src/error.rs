//! Error types for curve construction and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur while building a tone curve.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Control points are not strictly increasing in x, or leave [0, 1].
    #[error("invalid knee curve control points: {reason}")]
    InvalidControlPoints {
        /// What is wrong with the points.
        reason: String,
    },

    /// Control points cannot define a solvable knee.
    #[error("degenerate curve: {0}")]
    DegenerateCurve(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
