// src/features.rs
use serde::Serialize;

use crate::geometry::distance_3d;
use crate::landmarks::NamedLandmarks;

/// 3D distances between fingertips (and thumb to index knuckle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSet {
    pub thumb_index: f64,
    pub index_middle: f64,
    pub middle_ring: f64,
    pub ring_pinky: f64,
    pub thumb_index_mcp: f64,
}

impl DistanceSet {
    pub fn evaluate(lm: &NamedLandmarks) -> Self {
        Self {
            thumb_index: distance_3d(&lm.thumb.tip, &lm.index.tip),
            index_middle: distance_3d(&lm.index.tip, &lm.middle.tip),
            middle_ring: distance_3d(&lm.middle.tip, &lm.ring.tip),
            ring_pinky: distance_3d(&lm.ring.tip, &lm.pinky.tip),
            thumb_index_mcp: distance_3d(&lm.thumb.tip, &lm.index.mcp),
        }
    }

    /// Mean of the four neighbouring tip gaps, thumb through pinky.
    pub fn mean_adjacent_tip_distance(&self) -> f64 {
        (self.thumb_index + self.index_middle + self.middle_ring + self.ring_pinky) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::landmarks::{self, extract};

    #[test]
    fn test_distances_from_tips() {
        let mut points = vec![Point3::zeros(); landmarks::LANDMARK_COUNT];
        points[landmarks::THUMB_TIP] = Point3::new(0.0, 0.0, 0.0);
        points[landmarks::INDEX_TIP] = Point3::new(0.3, 0.4, 0.0);
        points[landmarks::MIDDLE_TIP] = Point3::new(0.3, 0.4, 0.1);
        points[landmarks::RING_TIP] = Point3::new(0.3, 0.6, 0.1);
        points[landmarks::PINKY_TIP] = Point3::new(0.3, 0.6, 0.1);
        points[landmarks::INDEX_MCP] = Point3::new(0.0, 0.0, 0.2);

        let d = DistanceSet::evaluate(&extract(&points).unwrap());
        assert!((d.thumb_index - 0.5).abs() < 1e-12);
        assert!((d.index_middle - 0.1).abs() < 1e-12);
        assert!((d.middle_ring - 0.2).abs() < 1e-12);
        assert_eq!(d.ring_pinky, 0.0);
        assert!((d.thumb_index_mcp - 0.2).abs() < 1e-12);
        assert!((d.mean_adjacent_tip_distance() - 0.2).abs() < 1e-12);
    }
}
