//! Temporal accumulation engine for radar hail classification scans.
//!
//! This crate turns a chronological stream of hydrometeor-classification
//! grids into two parallel products: an instantaneous severity grid per
//! scan and a running cumulative severity grid across the whole
//! observation window. It enables:
//!
//! - **Hail swath reconstruction**: the cumulative grid traces where
//!   hail fell over a session, weighted by severity
//! - **Animation-ready frames**: each step pairs the instantaneous and
//!   cumulative pictures under one timestamp
//! - **Replay determinism**: the same scan sequence always reproduces
//!   the same cumulative grid, bit for bit
//!
//! # Architecture
//!
//! ```text
//! Scan (decoded upstream)
//!      │
//!      ▼
//! align(scan, session grid)
//!      │
//!      ├─► nearest-cell lookup under the scan's georeference
//!      │
//!      └─► Severity::from_code per cell
//!               │
//!               ▼
//! Accumulator::update(aligned, timestamp)
//!      │
//!      ├─► strict timestamp ordering, all-or-nothing
//!      │
//!      └─► cumulative[cell] += severity
//!               │
//!               ▼
//! FrameEmitter::emit ──► Frame { instantaneous, cumulative snapshot }
//!               │
//!               ▼
//!      rendering (external)
//! ```
//!
//! # Example
//!
//! ```
//! use hail_index::{Scan, Session, SessionConfig};
//! use radar_common::{CrsCode, GridSpec};
//! use chrono::{TimeZone, Utc};
//!
//! let grid = GridSpec::new(3, 3, 1.0, -1.0, 0.0, 2.0, CrsCode::Epsg4326);
//! let mut session = Session::new(grid.clone(), SessionConfig::default()).unwrap();
//!
//! // Code 11 is large hail, severity 2
//! let mut codes = vec![0u8; 9];
//! codes[4] = 11;
//! let scan = Scan::new(
//!     codes,
//!     grid,
//!     Utc.with_ymd_and_hms(2024, 5, 18, 21, 0, 0).unwrap(),
//!     "KTLX",
//! )
//! .unwrap();
//!
//! let frame = session.process_scan(&scan).unwrap();
//! assert_eq!(frame.cumulative.get(1, 1), Some(2));
//! ```

pub mod accumulate;
pub mod align;
pub mod composite;
pub mod config;
pub mod error;
pub mod frame;
pub mod scan;
pub mod session;
pub mod severity;
pub mod types;

// Re-export commonly used types at crate root
pub use accumulate::{Accumulator, AccumulatorCheckpoint, AccumulatorState};
pub use align::align;
pub use composite::{max_composite, slice_by_window};
pub use config::SessionConfig;
pub use error::{HailIndexError, Result};
pub use frame::{Frame, FrameEmitter};
pub use scan::Scan;
pub use session::{FrameSink, RunSummary, Session};
pub use severity::{Severity, CODE_GIANT_HAIL, CODE_HAIL, CODE_LARGE_HAIL};
pub use types::{CumulativeGrid, SeverityGrid};
