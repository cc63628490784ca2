// src/landmarks.rs - Named view over the 21 MediaPipe hand landmarks
use crate::error::{GestureError, Result};
use crate::geometry::Point3;

pub const LANDMARK_COUNT: usize = 21;

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbJoints {
    pub cmc: Point3,
    pub mcp: Point3,
    pub ip: Point3,
    pub tip: Point3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerJoints {
    pub mcp: Point3,
    pub pip: Point3,
    pub dip: Point3,
    pub tip: Point3,
}

impl FingerJoints {
    fn from_slice(lm: &[Point3], mcp: usize) -> Self {
        Self {
            mcp: lm[mcp],
            pip: lm[mcp + 1],
            dip: lm[mcp + 2],
            tip: lm[mcp + 3],
        }
    }
}

/// One hand's landmarks by anatomical name. Frame-scoped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedLandmarks {
    pub wrist: Point3,
    pub thumb: ThumbJoints,
    pub index: FingerJoints,
    pub middle: FingerJoints,
    pub ring: FingerJoints,
    pub pinky: FingerJoints,
}

/// Map the tracker's ordered points onto named joints.
///
/// Rejects anything other than exactly 21 finite points.
pub fn extract(lm: &[Point3]) -> Result<NamedLandmarks> {
    if lm.len() != LANDMARK_COUNT {
        return Err(GestureError::InvalidInput(format!(
            "expected {} landmarks, got {}",
            LANDMARK_COUNT,
            lm.len()
        )));
    }

    if let Some(i) = lm.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(GestureError::InvalidInput(format!(
            "landmark {} has a non-finite coordinate",
            i
        )));
    }

    Ok(NamedLandmarks {
        wrist: lm[WRIST],
        thumb: ThumbJoints {
            cmc: lm[THUMB_CMC],
            mcp: lm[THUMB_MCP],
            ip: lm[THUMB_IP],
            tip: lm[THUMB_TIP],
        },
        index: FingerJoints::from_slice(lm, INDEX_MCP),
        middle: FingerJoints::from_slice(lm, MIDDLE_MCP),
        ring: FingerJoints::from_slice(lm, RING_MCP),
        pinky: FingerJoints::from_slice(lm, PINKY_MCP),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed_hand() -> Vec<Point3> {
        (0..LANDMARK_COUNT)
            .map(|i| Point3::new(i as f64, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_extract_maps_indices() {
        let named = extract(&indexed_hand()).unwrap();
        assert_eq!(named.wrist.x, 0.0);
        assert_eq!(named.thumb.mcp.x, THUMB_MCP as f64);
        assert_eq!(named.thumb.tip.x, THUMB_TIP as f64);
        assert_eq!(named.index.mcp.x, INDEX_MCP as f64);
        assert_eq!(named.index.tip.x, INDEX_TIP as f64);
        assert_eq!(named.middle.pip.x, MIDDLE_PIP as f64);
        assert_eq!(named.ring.dip.x, RING_DIP as f64);
        assert_eq!(named.pinky.tip.x, PINKY_TIP as f64);
    }

    #[test]
    fn test_extract_rejects_wrong_count() {
        let mut hand = indexed_hand();
        hand.pop();
        assert!(matches!(extract(&hand), Err(GestureError::InvalidInput(_))));
        assert!(matches!(extract(&[]), Err(GestureError::InvalidInput(_))));
    }

    #[test]
    fn test_extract_rejects_non_finite() {
        let mut hand = indexed_hand();
        hand[PINKY_PIP].y = f64::NAN;
        assert!(matches!(extract(&hand), Err(GestureError::InvalidInput(_))));

        hand[PINKY_PIP].y = 0.0;
        hand[WRIST].z = f64::INFINITY;
        assert!(extract(&hand).is_err());
    }
}
