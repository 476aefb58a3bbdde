//! Alignment of native-grid scans onto the session grid.

use radar_common::GridSpec;

use crate::error::{HailIndexError, Result};
use crate::scan::Scan;
use crate::severity::Severity;
use crate::types::SeverityGrid;

/// Align a scan onto the session grid, mapping codes to severities.
///
/// For each cell of `target`, the nearest cell of the scan's native grid
/// is looked up under the scan's georeference and its classification
/// code is mapped through [`Severity::from_code`]. Cells the scan does
/// not cover are severity 0 for this frame; spatial non-coverage is not
/// missing data, it is simply a quiet cell.
///
/// Alignment is pure and idempotent: identical inputs produce
/// bit-identical output grids.
///
/// # Errors
///
/// Fails with [`HailIndexError::IncompatibleProjection`] when the scan's
/// CRS differs from the target's. The session grid's coordinate system
/// is fixed at first use, so this is fatal to the session rather than
/// silently zero-filled.
pub fn align(scan: &Scan, target: &GridSpec) -> Result<SeverityGrid> {
    if !target.is_compatible(&scan.spec) {
        return Err(HailIndexError::IncompatibleProjection {
            scan: scan.spec.crs,
            target: target.crs,
        });
    }

    let mut grid = SeverityGrid::zeros(target.nx, target.ny);

    for j in 0..target.ny {
        for i in 0..target.nx {
            let point = match target.index_to_coord(i, j) {
                Some(p) => p,
                None => continue,
            };

            let severity = match scan.spec.coord_to_index(point.x, point.y) {
                Some((si, sj)) => Severity::from_code(scan.code_at(si, sj).unwrap_or(0)),
                None => Severity::None,
            };

            if severity != Severity::None {
                grid.set(i, j, severity.as_u8());
            }
        }
    }

    Ok(grid)
}
