//! Error types for the accumulation engine.

use chrono::{DateTime, Utc};
use radar_common::CrsCode;
use thiserror::Error;

/// Errors that can occur while accumulating scans.
#[derive(Error, Debug)]
pub enum HailIndexError {
    /// A scan's georeference cannot be aligned onto the session grid.
    ///
    /// Fatal to the session: the cumulative grid's coordinate system is
    /// fixed at first use, so a scan in an unrelated CRS can never
    /// contribute.
    #[error("incompatible scan projection: scan is {scan}, session grid is {target}")]
    IncompatibleProjection { scan: CrsCode, target: CrsCode },

    /// A scan arrived with a timestamp at or before the last processed one.
    ///
    /// The offending update is rejected whole; accumulator state is left
    /// untouched. The caller decides whether to skip, reorder upstream,
    /// or abort.
    #[error("out-of-order scan: {offending} is not after {last}")]
    OutOfOrderScan {
        last: DateTime<Utc>,
        offending: DateTime<Utc>,
    },

    /// A grid does not match the shape the operation requires.
    #[error("grid shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// A composite was requested over zero grids.
    #[error("cannot composite an empty window")]
    EmptyComposite,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HailIndexError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for accumulation engine operations.
pub type Result<T> = std::result::Result<T, HailIndexError>;
