//! Grid specifications for radar classification data.

use crate::{BoundingBox, CrsCode};
use serde::{Deserialize, Serialize};

/// Specification of a regular 2-D grid in a single CRS.
///
/// Describes the spatial index shared by every scan in a session: cell
/// counts, cell size, the coordinate of the first cell center, and the
/// coordinate reference system. Created once at session start and never
/// mutated; all grids produced by the engine are shaped by one of these.
///
/// `dx`/`dy` are signed. Radar mosaics are stored north-to-south, so the
/// usual form has a negative `dy` with `first_y` at the northern edge.
/// Data is row-major: row `j` holds cells `j * nx .. (j + 1) * nx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of cells in X (columns)
    pub nx: usize,
    /// Number of cells in Y (rows)
    pub ny: usize,
    /// Cell size in X direction (degrees or meters depending on CRS)
    pub dx: f64,
    /// Cell size in Y direction (negative for north-to-south grids)
    pub dy: f64,
    /// X coordinate of the first cell center
    pub first_x: f64,
    /// Y coordinate of the first cell center
    pub first_y: f64,
    /// Coordinate reference system of the grid
    pub crs: CrsCode,
}

impl GridSpec {
    /// Create a new grid specification.
    pub fn new(
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        first_x: f64,
        first_y: f64,
        crs: CrsCode,
    ) -> Self {
        Self {
            nx,
            ny,
            dx,
            dy,
            first_x,
            first_y,
            crs,
        }
    }

    /// Calculate the bounding box of the cell centers.
    pub fn bbox(&self) -> BoundingBox {
        let last_x = self.first_x + (self.nx.saturating_sub(1)) as f64 * self.dx;
        let last_y = self.first_y + (self.ny.saturating_sub(1)) as f64 * self.dy;

        BoundingBox {
            min_x: self.first_x.min(last_x),
            min_y: self.first_y.min(last_y),
            max_x: self.first_x.max(last_x),
            max_y: self.first_y.max(last_y),
        }
    }

    /// Convert a grid index to the cell-center coordinate.
    pub fn index_to_coord(&self, i: usize, j: usize) -> Option<GridPoint> {
        if i >= self.nx || j >= self.ny {
            return None;
        }

        Some(GridPoint {
            x: self.first_x + i as f64 * self.dx,
            y: self.first_y + j as f64 * self.dy,
            i,
            j,
        })
    }

    /// Convert a coordinate to the nearest grid index.
    ///
    /// Returns `None` when the nearest cell falls outside the grid.
    pub fn coord_to_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let i_f = (x - self.first_x) / self.dx;
        let j_f = (y - self.first_y) / self.dy;

        let i = i_f.round() as isize;
        let j = j_f.round() as isize;

        if i < 0 || j < 0 || i >= self.nx as isize || j >= self.ny as isize {
            return None;
        }

        Some((i as usize, j as usize))
    }

    /// Get the 1D array index for a 2D grid position (row-major).
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }

    /// Check whether another grid can be aligned onto this one.
    ///
    /// Alignment is same-projection only: two grids are compatible iff
    /// their CRS codes are equal. Resolution and extent may differ.
    pub fn is_compatible(&self, other: &GridSpec) -> bool {
        self.crs == other.crs
    }
}

/// A cell on the grid with both indices and its center coordinate.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub i: usize,
    pub j: usize,
}

/// Common grid definitions for radar mosaics.
pub mod grids {
    use super::*;

    /// CONUS 1-km hail mosaic grid in web mercator.
    ///
    /// Covers the US bounds (-125°, 24°) to (-66°, 50°) reprojected to
    /// EPSG:3857 at 1000 m resolution, north-to-south row order.
    pub fn conus_1km() -> GridSpec {
        GridSpec::new(
            6568,
            3693,
            1000.0,
            -1000.0,
            -13914936.0,
            6446276.0, // NW corner in projection coords
            CrsCode::Epsg3857,
        )
    }

    /// Single-site test grid centered on a radar in geographic coordinates.
    ///
    /// Roughly a 460-km square footprint at ~1-km resolution, matching the
    /// extent of a level-3 classification product.
    pub fn site_4326(center_lon: f64, center_lat: f64) -> GridSpec {
        let half_extent = 2.3; // degrees, ~255 km at mid-latitudes
        let n = 461;
        let step = 2.0 * half_extent / (n - 1) as f64;

        GridSpec::new(
            n,
            n,
            step,
            -step,
            center_lon - half_extent,
            center_lat + half_extent,
            CrsCode::Epsg4326,
        )
    }
}
