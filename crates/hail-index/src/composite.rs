//! Reduction of multi-site scans into one grid per time window.
//!
//! Overlapping radar sites and sub-interval revisits produce several
//! scans per interval; they are reduced to a single grid by cell-wise
//! maximum before accumulation, so a cell observed by two sites in one
//! window counts its strongest signature once.

use chrono::Duration;
use radar_common::TimeWindow;
use tracing::debug;

use crate::error::{HailIndexError, Result};
use crate::scan::Scan;
use crate::types::SeverityGrid;

/// Cell-wise maximum across same-shaped severity grids.
///
/// # Errors
///
/// - [`HailIndexError::EmptyComposite`] for zero input grids.
/// - [`HailIndexError::ShapeMismatch`] when grids differ in shape.
pub fn max_composite(grids: &[SeverityGrid]) -> Result<SeverityGrid> {
    let first = grids.first().ok_or(HailIndexError::EmptyComposite)?;
    let mut composite = first.clone();

    for grid in &grids[1..] {
        if grid.nx != composite.nx || grid.ny != composite.ny {
            return Err(HailIndexError::shape_mismatch(
                composite.shape_string(),
                grid.shape_string(),
            ));
        }

        for (cell, &severity) in grid.data.iter().enumerate() {
            if severity > composite.data[cell] {
                composite.data[cell] = severity;
            }
        }
    }

    Ok(composite)
}

/// Partition a chronological scan list into fixed time windows.
///
/// Windows are half-open `[start, start + window)`, starting at the
/// earliest scan timestamp. Every scan lands in exactly one window;
/// windows with no scans are omitted.
///
/// # Errors
///
/// [`HailIndexError::Config`] when the window length is not positive.
pub fn slice_by_window(
    scans: Vec<Scan>,
    window: Duration,
) -> Result<Vec<(TimeWindow, Vec<Scan>)>> {
    let window_secs = window.num_seconds();
    if window_secs <= 0 {
        return Err(HailIndexError::Config(
            "composite window must be a positive duration".to_string(),
        ));
    }

    let start = match scans.iter().map(|s| s.timestamp).min() {
        Some(min) => min,
        None => return Ok(Vec::new()),
    };

    let mut buckets: Vec<(TimeWindow, Vec<Scan>)> = Vec::new();
    for scan in scans {
        let offset = (scan.timestamp - start).num_seconds() / window_secs;
        let window_start = start + Duration::seconds(offset * window_secs);
        let slot = TimeWindow::starting_at(window_start, window);

        match buckets.iter_mut().find(|(w, _)| *w == slot) {
            Some((_, members)) => members.push(scan),
            None => buckets.push((slot, vec![scan])),
        }
    }

    buckets.sort_by_key(|(w, _)| w.start);

    debug!(
        windows = buckets.len(),
        window_secs, "Sliced scans into composite windows"
    );

    Ok(buckets)
}
