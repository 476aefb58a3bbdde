//! Mapping from hydrometeor classification codes to hail severity.

use serde::{Deserialize, Serialize};

/// Classification code for hail.
pub const CODE_HAIL: u8 = 10;
/// Classification code for large hail.
pub const CODE_LARGE_HAIL: u8 = 11;
/// Classification code for giant hail.
pub const CODE_GIANT_HAIL: u8 = 12;

/// Ordinal hail severity of a single classification code.
///
/// The classification product labels each cell with the dominant
/// particle type; only the three hail classes are of interest here and
/// they map onto a 1-3 scale. Every other code — no classification,
/// rain, biological returns, codes added to the product after this was
/// written — maps to `None` rather than erroring, so the conversion is
/// total over `u8`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Severity {
    /// No hail signature
    #[default]
    None = 0,
    /// Hail
    Hail = 1,
    /// Large hail
    LargeHail = 2,
    /// Giant hail
    GiantHail = 3,
}

impl Severity {
    /// Map a classification code to its severity.
    pub fn from_code(code: u8) -> Self {
        match code {
            CODE_HAIL => Severity::Hail,
            CODE_LARGE_HAIL => Severity::LargeHail,
            CODE_GIANT_HAIL => Severity::GiantHail,
            _ => Severity::None,
        }
    }

    /// The ordinal value (0-3).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::None => "none",
            Severity::Hail => "hail",
            Severity::LargeHail => "large hail",
            Severity::GiantHail => "giant hail",
        };
        write!(f, "{}", name)
    }
}
