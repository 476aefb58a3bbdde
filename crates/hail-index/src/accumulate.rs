//! The stateful accumulation core.

use chrono::{DateTime, Utc};
use radar_common::GridSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HailIndexError, Result};
use crate::types::{CumulativeGrid, SeverityGrid};

/// Lifecycle state of an [`Accumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No scans processed; cumulative grid is all zero.
    Empty,
    /// At least one scan processed.
    Active,
}

/// Owns the cumulative severity grid for one session.
///
/// Consumes aligned severity grids one at a time, in chronological
/// order, and maintains the per-cell running sum plus per-cell
/// last-contribution metadata. The cumulative grid is exclusively owned
/// here and only ever leaves as a copied snapshot, so emitted frames can
/// never alias live state.
///
/// Updates are all-or-nothing: every validation happens before the first
/// cell is touched, so a rejected update leaves state bit-identical.
/// Replaying the same chronological sequence from `Empty` always
/// reproduces the same cumulative grid.
#[derive(Debug, Clone)]
pub struct Accumulator {
    cumulative: CumulativeGrid,
    last_timestamp: Option<DateTime<Utc>>,
    last_contribution: Vec<Option<DateTime<Utc>>>,
    scan_count: u64,
}

impl Accumulator {
    /// Create an empty accumulator shaped like the session grid.
    pub fn new(spec: &GridSpec) -> Self {
        Self {
            cumulative: CumulativeGrid::zeros(spec.nx, spec.ny),
            last_contribution: vec![None; spec.len()],
            last_timestamp: None,
            scan_count: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AccumulatorState {
        if self.last_timestamp.is_none() {
            AccumulatorState::Empty
        } else {
            AccumulatorState::Active
        }
    }

    /// Fold one aligned severity grid into the cumulative sum.
    ///
    /// # Errors
    ///
    /// - [`HailIndexError::OutOfOrderScan`] when `timestamp` is not
    ///   strictly greater than the last recorded timestamp (first call
    ///   exempt). State is left unchanged.
    /// - [`HailIndexError::ShapeMismatch`] when the grid's shape differs
    ///   from the session grid. State is left unchanged.
    pub fn update(&mut self, grid: &SeverityGrid, timestamp: DateTime<Utc>) -> Result<()> {
        if grid.nx != self.cumulative.nx || grid.ny != self.cumulative.ny {
            return Err(HailIndexError::shape_mismatch(
                self.cumulative.shape_string(),
                grid.shape_string(),
            ));
        }

        if let Some(last) = self.last_timestamp {
            if timestamp <= last {
                return Err(HailIndexError::OutOfOrderScan {
                    last,
                    offending: timestamp,
                });
            }
        }

        let mut contributed = 0usize;
        for (cell, &severity) in grid.data.iter().enumerate() {
            if severity > 0 {
                self.cumulative.data[cell] += severity as u32;
                self.last_contribution[cell] = Some(timestamp);
                contributed += 1;
            }
        }

        self.last_timestamp = Some(timestamp);
        self.scan_count += 1;

        debug!(
            timestamp = %timestamp,
            cells = contributed,
            scans = self.scan_count,
            "Accumulated severity grid"
        );

        Ok(())
    }

    /// A full copy of the cumulative grid.
    pub fn snapshot(&self) -> CumulativeGrid {
        self.cumulative.clone()
    }

    /// Timestamp of the last accepted update, if any.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }

    /// Number of updates accepted so far.
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    /// Per-cell timestamps of the most recent non-zero contribution.
    pub fn last_contributions(&self) -> &[Option<DateTime<Utc>>] {
        &self.last_contribution
    }

    /// Capture the full accumulator state for persistence.
    pub fn checkpoint(&self) -> AccumulatorCheckpoint {
        AccumulatorCheckpoint {
            cumulative: self.cumulative.clone(),
            last_timestamp: self.last_timestamp,
            last_contribution: self.last_contribution.clone(),
            scan_count: self.scan_count,
        }
    }

    /// Rebuild an accumulator from a checkpoint.
    ///
    /// Replaying the scans recorded after the checkpoint then yields the
    /// same state as processing the whole sequence from `Empty`.
    pub fn resume(checkpoint: AccumulatorCheckpoint) -> Result<Self> {
        if checkpoint.cumulative.len() != checkpoint.last_contribution.len() {
            return Err(HailIndexError::shape_mismatch(
                format!("{} cells", checkpoint.cumulative.len()),
                format!(
                    "{} last-contribution entries",
                    checkpoint.last_contribution.len()
                ),
            ));
        }

        Ok(Self {
            cumulative: checkpoint.cumulative,
            last_timestamp: checkpoint.last_timestamp,
            last_contribution: checkpoint.last_contribution,
            scan_count: checkpoint.scan_count,
        })
    }
}

/// Serializable snapshot of the full accumulator state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulatorCheckpoint {
    pub cumulative: CumulativeGrid,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub last_contribution: Vec<Option<DateTime<Utc>>>,
    pub scan_count: u64,
}
