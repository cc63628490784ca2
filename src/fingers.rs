// src/fingers.rs - Per-finger flexion at the PIP joint
use serde::Serialize;

use crate::config::AngleThresholds;
use crate::geometry::{distance_3d, joint_angle_degrees, Point3};
use crate::landmarks::{FingerJoints, NamedLandmarks};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FingerState {
    pub bent: bool,
    /// Interior MCP-PIP-TIP angle, 0..=180
    pub angle_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FingerStates {
    pub index: FingerState,
    pub middle: FingerState,
    pub ring: FingerState,
    pub pinky: FingerState,
}

impl FingerStates {
    pub fn evaluate(lm: &NamedLandmarks, angles: &AngleThresholds) -> Self {
        Self {
            index: FingerState::evaluate(&lm.index, angles),
            middle: FingerState::evaluate(&lm.middle, angles),
            ring: FingerState::evaluate(&lm.ring, angles),
            pinky: FingerState::evaluate(&lm.pinky, angles),
        }
    }

    pub fn all_bent(&self) -> bool {
        self.index.bent && self.middle.bent && self.ring.bent && self.pinky.bent
    }
}

impl FingerState {
    fn evaluate(finger: &FingerJoints, angles: &AngleThresholds) -> Self {
        Self {
            bent: bent_state(&finger.tip, &finger.pip, &finger.mcp, angles),
            angle_degrees: finger_angle(&finger.mcp, &finger.pip, &finger.tip),
        }
    }

    /// Straight enough to count as extended: not bent and past the extend threshold.
    pub fn extended(&self, angles: &AngleThresholds) -> bool {
        !self.bent && self.angle_degrees > angles.extend
    }
}

pub fn finger_angle(mcp: &Point3, pip: &Point3, tip: &Point3) -> f64 {
    joint_angle_degrees(mcp, pip, tip)
}

/// A finger is bent when the PIP angle is under the bend threshold and the
/// fingertip has actually folded back toward the knuckle.
pub fn bent_state(tip: &Point3, pip: &Point3, mcp: &Point3, angles: &AngleThresholds) -> bool {
    if finger_angle(mcp, pip, tip) >= angles.bend {
        return false;
    }

    let path = distance_3d(mcp, pip) + distance_3d(pip, tip);
    if path == 0.0 {
        return false;
    }
    distance_3d(mcp, tip) < angles.bend_chord_ratio * path
}
