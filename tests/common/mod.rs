//! Synthetic hand poses for integration tests.
#![allow(dead_code)]

use vowel_sign::{HandId, HandObservation, Handedness, LandmarkFrame, Point3};

#[derive(Debug, Clone, Copy)]
pub enum Digit {
    Index,
    Middle,
    Ring,
    Pinky,
}

const MCP_X: [f64; 4] = [0.40, 0.47, 0.54, 0.61];
const MCP_Y: f64 = 0.56;
const SEGMENT: f64 = 0.06;

/// Upright right hand in image space. Each finger rises from its knuckle to the
/// PIP joint, then the distal segment is rotated toward +x to get the requested
/// PIP angle (180 = straight up, 90 = pointing sideways).
#[derive(Debug, Clone)]
pub struct HandBuilder {
    angles: [f64; 4],
    distal: [f64; 4],
    thumb_tip: Point3,
}

impl HandBuilder {
    pub fn new() -> Self {
        Self {
            angles: [180.0; 4],
            distal: [SEGMENT; 4],
            thumb_tip: Point3::new(0.20, 0.75, 0.0),
        }
    }

    /// All four fingers folded to `angle`.
    pub fn fist(angle: f64) -> Self {
        let mut hand = Self::new();
        for digit in [Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky] {
            hand = hand.bend(digit, angle);
        }
        hand
    }

    pub fn bend(mut self, digit: Digit, angle: f64) -> Self {
        self.angles[digit as usize] = angle;
        self
    }

    /// Stretch the distal segment so the tip lands at height `y`. Needs an angle above 90.
    pub fn tip_y(mut self, digit: Digit, y: f64) -> Self {
        let i = digit as usize;
        let theta = (180.0 - self.angles[i]).to_radians();
        assert!(theta.cos() > 0.0, "tip must point upward to place it by height");
        self.distal[i] = (self.pip(digit).y - y) / theta.cos();
        self
    }

    pub fn thumb_tip(mut self, tip: Point3) -> Self {
        self.thumb_tip = tip;
        self
    }

    /// Put the thumb tip `to_mcp` from the index knuckle and `to_tip` from the
    /// index fingertip, on the outer side of the hand.
    pub fn thumb_from_index(mut self, to_mcp: f64, to_tip: f64) -> Self {
        let a = self.mcp(Digit::Index);
        let b = self.tip(Digit::Index);
        let ab = b - a;
        let d = ab.norm();
        let along = (to_mcp * to_mcp - to_tip * to_tip + d * d) / (2.0 * d);
        let h = (to_mcp * to_mcp - along * along).sqrt();
        assert!(h.is_finite(), "distances do not meet");

        let base = a + ab * (along / d);
        let perp = Point3::new(-ab.y, ab.x, 0.0) / d;
        let p1 = base + perp * h;
        let p2 = base - perp * h;
        self.thumb_tip = if p1.x < p2.x { p1 } else { p2 };
        self
    }

    pub fn mcp(&self, digit: Digit) -> Point3 {
        Point3::new(MCP_X[digit as usize], MCP_Y, 0.0)
    }

    pub fn pip(&self, digit: Digit) -> Point3 {
        self.mcp(digit) - Point3::new(0.0, SEGMENT, 0.0)
    }

    pub fn tip(&self, digit: Digit) -> Point3 {
        let i = digit as usize;
        let theta = (180.0 - self.angles[i]).to_radians();
        self.pip(digit) + Point3::new(theta.sin(), -theta.cos(), 0.0) * self.distal[i]
    }

    pub fn build(&self) -> Vec<Point3> {
        let wrist = Point3::new(0.50, 0.85, 0.0);
        let thumb_cmc = Point3::new(0.36, 0.78, 0.0);
        let thumb_mcp = Point3::new(0.30, 0.72, 0.0);
        let thumb_ip = (thumb_mcp + self.thumb_tip) / 2.0;

        let mut points = vec![wrist, thumb_cmc, thumb_mcp, thumb_ip, self.thumb_tip];
        for digit in [Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky] {
            let pip = self.pip(digit);
            let tip = self.tip(digit);
            points.extend([self.mcp(digit), pip, (pip + tip) / 2.0, tip]);
        }
        points
    }

    pub fn observation(&self, index: HandId) -> HandObservation {
        HandObservation {
            index,
            handedness: Some(Handedness::Right),
            landmarks: self.build().iter().map(|p| [p.x, p.y, p.z]).collect(),
        }
    }
}

pub fn pose_a() -> HandBuilder {
    HandBuilder::fist(90.0).thumb_from_index(0.15, 0.10)
}

pub fn pose_e() -> HandBuilder {
    let hand = HandBuilder::fist(90.0);
    let tip = hand.tip(Digit::Index);
    hand.thumb_tip(tip + Point3::new(0.0, 0.0, 0.03))
}

pub fn pose_i() -> HandBuilder {
    HandBuilder::fist(90.0)
        .bend(Digit::Pinky, 170.0)
        .tip_y(Digit::Pinky, 0.30)
}

pub fn pose_o() -> HandBuilder {
    let hand = HandBuilder::fist(150.0);
    let tip = hand.tip(Digit::Index);
    hand.thumb_tip(tip - Point3::new(0.05, 0.0, 0.0))
}

pub fn pose_u() -> HandBuilder {
    HandBuilder::fist(90.0)
        .bend(Digit::Index, 175.0)
        .bend(Digit::Middle, 175.0)
}

pub fn frame(timestamp: f64, hands: Vec<HandObservation>) -> LandmarkFrame {
    LandmarkFrame { timestamp, hands }
}
