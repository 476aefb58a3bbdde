//! Grid value types produced by the accumulation engine.

use serde::{Deserialize, Serialize};

/// An instantaneous severity grid for one scan interval.
///
/// Values are ordinal severities 0-3, row-major, shaped exactly like the
/// session grid. Cells the scan did not cover hold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityGrid {
    /// The severity values (row-major order).
    pub data: Vec<u8>,
    /// Number of columns.
    pub nx: usize,
    /// Number of rows.
    pub ny: usize,
}

impl SeverityGrid {
    /// Create an all-zero severity grid.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            data: vec![0; nx * ny],
            nx,
            ny,
        }
    }

    /// Get the severity at a grid position.
    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        if i >= self.nx || j >= self.ny {
            return None;
        }
        self.data.get(j * self.nx + i).copied()
    }

    /// Set the severity at a grid position. Out-of-range writes are ignored.
    pub fn set(&mut self, i: usize, j: usize, severity: u8) {
        if i < self.nx && j < self.ny {
            self.data[j * self.nx + i] = severity;
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of cells with a non-zero severity.
    pub fn nonzero_cells(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    /// Shape as a "{nx}x{ny}" string for error reporting.
    pub fn shape_string(&self) -> String {
        format!("{}x{}", self.nx, self.ny)
    }
}

/// The running per-cell severity sum across a session.
///
/// Sums are u32: severities are at most 3 per scan and realistic
/// sessions (hours at a ~5-minute cadence) stay far below the type's
/// range, so overflow is a configuration concern rather than a runtime
/// check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeGrid {
    /// The per-cell sums (row-major order).
    pub data: Vec<u32>,
    /// Number of columns.
    pub nx: usize,
    /// Number of rows.
    pub ny: usize,
}

impl CumulativeGrid {
    /// Create an all-zero cumulative grid.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            data: vec![0; nx * ny],
            nx,
            ny,
        }
    }

    /// Get the cumulative sum at a grid position.
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        if i >= self.nx || j >= self.ny {
            return None;
        }
        self.data.get(j * self.nx + i).copied()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum over every cell, for quick whole-grid sanity checks.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|&v| v as u64).sum()
    }

    /// Shape as a "{nx}x{ny}" string for error reporting.
    pub fn shape_string(&self) -> String {
        format!("{}x{}", self.nx, self.ny)
    }
}
