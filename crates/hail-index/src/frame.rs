//! Frame assembly for downstream rendering.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::accumulate::Accumulator;
use crate::config::SessionConfig;
use crate::types::{CumulativeGrid, SeverityGrid};

/// One animation frame: the instantaneous picture and the running sum.
///
/// Immutable once emitted. The cumulative grid is a full copy taken at
/// emission time; later accumulator updates cannot alter it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time of the scan (or window) this frame depicts.
    pub timestamp: DateTime<Utc>,
    /// Severities contributed by this scan alone.
    pub instantaneous: SeverityGrid,
    /// Snapshot of the running per-cell sum.
    pub cumulative: CumulativeGrid,
    /// Flat indices of cells whose last contribution has gone stale.
    ///
    /// A cell is stale when it has accumulated severity but nothing has
    /// contributed to it for longer than the configured multiple of the
    /// nominal scan interval. Informational only; small fast-moving
    /// storms between scans simply stop contributing, they are never
    /// interpolated.
    pub stale_cells: Vec<usize>,
}

/// Combines instantaneous and cumulative grids into emitted frames.
#[derive(Debug, Clone)]
pub struct FrameEmitter {
    stale_after: Duration,
}

impl FrameEmitter {
    /// Create an emitter from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let stale_secs =
            config.nominal_scan_interval_secs as f64 * config.stale_after_intervals;
        Self {
            stale_after: Duration::seconds(stale_secs as i64),
        }
    }

    /// The age beyond which a contributing cell is flagged stale.
    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    /// Assemble a frame from this step's aligned grid and the accumulator.
    ///
    /// Takes ownership of the instantaneous grid (it belongs to this
    /// frame alone) and copies the cumulative state out of the
    /// accumulator.
    pub fn emit(
        &self,
        instantaneous: SeverityGrid,
        accumulator: &Accumulator,
        timestamp: DateTime<Utc>,
    ) -> Frame {
        let cumulative = accumulator.snapshot();
        let horizon = timestamp - self.stale_after;

        let stale_cells = accumulator
            .last_contributions()
            .iter()
            .enumerate()
            .filter_map(|(cell, last)| match last {
                Some(last) if *last < horizon && cumulative.data[cell] > 0 => Some(cell),
                _ => None,
            })
            .collect();

        Frame {
            timestamp,
            instantaneous,
            cumulative,
            stale_cells,
        }
    }
}
