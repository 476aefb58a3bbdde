//! Test data generators for synthetic hydrometeor-classification scans.
//!
//! These generators create predictable, verifiable code patterns that can
//! be used across the test suite. Classification codes follow the radar
//! product convention: 10 = hail, 11 = large hail, 12 = giant hail,
//! everything else is a non-hail class.

/// Classification code for rain, used as a non-hail filler.
pub const CODE_RAIN: u8 = 60;

/// Creates a code grid filled with a single classification code.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `code` - Classification code for every cell
///
/// # Returns
///
/// A `Vec<u8>` in row-major order (row 0 first, then row 1, etc.)
pub fn create_uniform_codes(width: usize, height: usize, code: u8) -> Vec<u8> {
    vec![code; width * height]
}

/// Creates an all-zero (no classification) code grid.
pub fn create_empty_codes(width: usize, height: usize) -> Vec<u8> {
    create_uniform_codes(width, height, 0)
}

/// Creates a code grid with a concentric hail core.
///
/// The cell at (`center_col`, `center_row`) and its immediate
/// surroundings form a realistic storm signature: giant hail at the
/// center, large hail in the first ring, hail in the second ring, rain
/// beyond that out to twice the radius, no classification elsewhere.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `center_col` - Column of the core center
/// * `center_row` - Row of the core center
/// * `radius` - Radius of the hail region in cells
///
/// # Returns
///
/// A `Vec<u8>` in row-major order.
pub fn create_hail_core_codes(
    width: usize,
    height: usize,
    center_col: usize,
    center_row: usize,
    radius: usize,
) -> Vec<u8> {
    let mut data = vec![0u8; width * height];
    let r = radius.max(1) as f64;

    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center_col as f64;
            let dy = row as f64 - center_row as f64;
            let dist = (dx * dx + dy * dy).sqrt();

            let code = if dist <= r / 3.0 {
                12 // giant hail
            } else if dist <= 2.0 * r / 3.0 {
                11 // large hail
            } else if dist <= r {
                10 // hail
            } else if dist <= 2.0 * r {
                CODE_RAIN
            } else {
                0
            };

            data[row * width + col] = code;
        }
    }

    data
}

/// Creates a code grid from per-row severity digits.
///
/// Each entry of `severities` is a row of values 0-3; values 1-3 are
/// translated back into the classification codes 10-12, zero stays
/// unclassified. Handy for writing scenario tests as readable literals.
///
/// # Panics
///
/// Panics if rows have unequal lengths (test misconstruction).
pub fn codes_from_severities(severities: &[&[u8]]) -> (Vec<u8>, usize, usize) {
    let height = severities.len();
    let width = severities.first().map_or(0, |row| row.len());
    let mut data = Vec::with_capacity(width * height);

    for row in severities {
        assert_eq!(row.len(), width, "ragged severity rows");
        for &sev in *row {
            let code = match sev {
                0 => 0,
                s => 9 + s, // 1..=3 -> 10..=12
            };
            data.push(code);
        }
    }

    (data, width, height)
}
