//! The synchronous accumulation pipeline.

use chrono::{DateTime, Utc};
use radar_common::GridSpec;
use tracing::{debug, info, instrument, warn};

use crate::accumulate::Accumulator;
use crate::align::align;
use crate::composite::max_composite;
use crate::config::SessionConfig;
use crate::error::{HailIndexError, Result};
use crate::frame::{Frame, FrameEmitter};
use crate::scan::Scan;

/// Consumer of emitted frames.
///
/// The seam to the external rendering layer: the session pushes each
/// frame in emission order and never looks at it again.
pub trait FrameSink {
    fn push(&mut self, frame: Frame);
}

impl FrameSink for Vec<Frame> {
    fn push(&mut self, frame: Frame) {
        Vec::push(self, frame);
    }
}

/// Counters describing a completed [`Session::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames emitted to the sink.
    pub frames_emitted: u64,
    /// Out-of-order scans skipped.
    pub scans_skipped: u64,
}

/// One accumulation session over a fixed spatial grid.
///
/// Drives the pipeline: align each scan onto the session grid, fold it
/// into the accumulator, emit a frame. Fully synchronous; one scan is
/// processed to completion before the next is admitted, and stopping
/// between scans leaves a valid fully-accumulated state.
#[derive(Debug)]
pub struct Session {
    target: GridSpec,
    accumulator: Accumulator,
    emitter: FrameEmitter,
    config: SessionConfig,
}

impl Session {
    /// Create a session over the given grid.
    pub fn new(target: GridSpec, config: SessionConfig) -> Result<Self> {
        config.validate().map_err(HailIndexError::Config)?;

        info!(
            nx = target.nx,
            ny = target.ny,
            crs = %target.crs,
            interval_secs = config.nominal_scan_interval_secs,
            "Starting accumulation session"
        );

        Ok(Self {
            accumulator: Accumulator::new(&target),
            emitter: FrameEmitter::new(&config),
            target,
            config,
        })
    }

    /// Create a session resuming from a previously captured accumulator.
    pub fn resume(
        target: GridSpec,
        config: SessionConfig,
        accumulator: Accumulator,
    ) -> Result<Self> {
        config.validate().map_err(HailIndexError::Config)?;

        let snapshot = accumulator.snapshot();
        if snapshot.nx != target.nx || snapshot.ny != target.ny {
            return Err(HailIndexError::shape_mismatch(
                format!("{}x{}", target.nx, target.ny),
                snapshot.shape_string(),
            ));
        }

        Ok(Self {
            emitter: FrameEmitter::new(&config),
            accumulator,
            target,
            config,
        })
    }

    /// The session grid.
    pub fn target(&self) -> &GridSpec {
        &self.target
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read access to the accumulator (state, counters, checkpointing).
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Process one scan: align, accumulate, emit.
    ///
    /// Errors surface immediately at the call that detected them; a
    /// failed scan leaves the accumulator untouched.
    #[instrument(skip(self, scan), fields(site = %scan.site_id, timestamp = %scan.timestamp))]
    pub fn process_scan(&mut self, scan: &Scan) -> Result<Frame> {
        let coverage = self.target.bbox().coverage_fraction(&scan.spec.bbox());
        debug!(coverage = format!("{:.2}", coverage), "Aligning scan");

        let aligned = align(scan, &self.target)?;
        self.accumulator.update(&aligned, scan.timestamp)?;

        debug!(
            cells = aligned.nonzero_cells(),
            scans = self.accumulator.scan_count(),
            "Scan accumulated"
        );

        Ok(self.emitter.emit(aligned, &self.accumulator, scan.timestamp))
    }

    /// Process one composite window of scans as a single update.
    ///
    /// Each scan is aligned onto the session grid, the aligned grids are
    /// reduced by cell-wise maximum, and the composite is accumulated
    /// under the given timestamp (conventionally the window start).
    #[instrument(skip(self, scans), fields(scans = scans.len(), timestamp = %timestamp))]
    pub fn process_window(
        &mut self,
        scans: &[Scan],
        timestamp: DateTime<Utc>,
    ) -> Result<Frame> {
        let aligned = scans
            .iter()
            .map(|scan| align(scan, &self.target))
            .collect::<Result<Vec<_>>>()?;

        let composite = max_composite(&aligned)?;
        self.accumulator.update(&composite, timestamp)?;

        debug!(cells = composite.nonzero_cells(), "Window accumulated");

        Ok(self
            .emitter
            .emit(composite, &self.accumulator, timestamp))
    }

    /// Drive a whole chronological scan sequence, pushing frames to `sink`.
    ///
    /// Out-of-order scans are skipped with a warning and counted in the
    /// summary; use [`Session::process_scan`] directly for abort-on-
    /// disorder semantics. Alignment failures abort the run: the session
    /// cannot continue once a scan proves spatially incompatible.
    pub fn run<I>(&mut self, scans: I, sink: &mut dyn FrameSink) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Scan>,
    {
        let mut summary = RunSummary::default();

        for scan in scans {
            match self.process_scan(&scan) {
                Ok(frame) => {
                    sink.push(frame);
                    summary.frames_emitted += 1;
                }
                Err(err @ HailIndexError::OutOfOrderScan { .. }) => {
                    warn!(site = %scan.site_id, error = %err, "Skipping out-of-order scan");
                    summary.scans_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            frames = summary.frames_emitted,
            skipped = summary.scans_skipped,
            state = ?self.accumulator.state(),
            "Session run complete"
        );

        Ok(summary)
    }
}
