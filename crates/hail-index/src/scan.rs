//! A single decoded classification scan.

use chrono::{DateTime, Utc};
use radar_common::GridSpec;

use crate::error::{HailIndexError, Result};

/// One decoded radar observation.
///
/// Holds the classification codes over the scan's native grid, the
/// capture timestamp, and the originating site. Produced by the decoder
/// upstream of this engine; owned transiently by the pipeline and
/// discarded after alignment.
#[derive(Debug, Clone)]
pub struct Scan {
    /// Classification codes over the native grid (row-major).
    pub codes: Vec<u8>,
    /// Georeference of the native grid.
    pub spec: GridSpec,
    /// Capture time of the observation.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the radar site that produced the scan.
    pub site_id: String,
}

impl Scan {
    /// Create a scan, validating the code buffer against the georeference.
    pub fn new(
        codes: Vec<u8>,
        spec: GridSpec,
        timestamp: DateTime<Utc>,
        site_id: impl Into<String>,
    ) -> Result<Self> {
        if codes.len() != spec.len() {
            return Err(HailIndexError::shape_mismatch(
                format!("{} cells ({}x{})", spec.len(), spec.nx, spec.ny),
                format!("{} codes", codes.len()),
            ));
        }

        Ok(Self {
            codes,
            spec,
            timestamp,
            site_id: site_id.into(),
        })
    }

    /// Get the classification code at a native grid position.
    pub fn code_at(&self, i: usize, j: usize) -> Option<u8> {
        if i >= self.spec.nx || j >= self.spec.ny {
            return None;
        }
        self.codes.get(self.spec.flat_index(i, j)).copied()
    }
}
