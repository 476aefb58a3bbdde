//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Compute the intersection of two bounding boxes.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        })
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Fraction of this bbox's area covered by `other` (0.0 - 1.0).
    ///
    /// Used to report how much of the session grid a single radar scan
    /// footprint covers.
    pub fn coverage_fraction(&self, other: &BoundingBox) -> f64 {
        let area = self.width() * self.height();
        if area <= 0.0 {
            return 0.0;
        }

        match self.intersection(other) {
            Some(overlap) => (overlap.width() * overlap.height()) / area,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        let intersection = a.intersection(&b).unwrap();
        assert_eq!(intersection.min_x, 5.0);
        assert_eq!(intersection.min_y, 5.0);
        assert_eq!(intersection.max_x, 10.0);
        assert_eq!(intersection.max_y, 10.0);
    }

    #[test]
    fn test_contains_point() {
        let bbox = BoundingBox::new(-125.0, 24.0, -66.0, 50.0);
        assert!(bbox.contains_point(-95.0, 35.0));
        assert!(!bbox.contains_point(-130.0, 35.0));
        assert!(!bbox.contains_point(-95.0, 55.0));
    }

    #[test]
    fn test_coverage_fraction() {
        let session = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let half = BoundingBox::new(0.0, 0.0, 5.0, 10.0);
        let outside = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!((session.coverage_fraction(&half) - 0.5).abs() < f64::EPSILON);
        assert_eq!(session.coverage_fraction(&outside), 0.0);
        assert!((session.coverage_fraction(&session) - 1.0).abs() < f64::EPSILON);
    }
}
