// src/classifier.rs - Rule-based vowel hand-shape classification
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::GestureConfig;
use crate::error::Result;
use crate::features::DistanceSet;
use crate::fingers::FingerStates;
use crate::geometry::{spread, Point3};
use crate::landmarks::{extract, NamedLandmarks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vowel {
    A,
    E,
    I,
    O,
    U,
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Vowel::A => "A",
            Vowel::E => "E",
            Vowel::I => "I",
            Vowel::O => "O",
            Vowel::U => "U",
        };
        f.write_str(letter)
    }
}

/// Everything the rules look at for one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    pub landmarks: NamedLandmarks,
    pub fingers: FingerStates,
    pub distances: DistanceSet,
}

impl HandFeatures {
    pub fn evaluate(points: &[Point3], config: &GestureConfig) -> Result<Self> {
        let landmarks = extract(points)?;
        Ok(Self {
            fingers: FingerStates::evaluate(&landmarks, &config.angles),
            distances: DistanceSet::evaluate(&landmarks),
            landmarks,
        })
    }
}

type Rule = fn(&HandFeatures, &GestureConfig) -> bool;

/// Checked in order; the first match wins. A and E are both closed fists and
/// differ only by the thumb, so they go before the looser shapes.
const RULES: [(Vowel, Rule); 5] = [
    (Vowel::A, is_a),
    (Vowel::E, is_e),
    (Vowel::I, is_i),
    (Vowel::O, is_o),
    (Vowel::U, is_u),
];

/// Closed fist, thumb held away from the side of the index finger.
fn is_a(h: &HandFeatures, cfg: &GestureConfig) -> bool {
    let f = &h.fingers;
    let bend = cfg.angles.bend;
    let thumb_apart = h.distances.thumb_index_mcp > cfg.distances.medium
        && h.distances.thumb_index > cfg.distances.close;

    f.all_bent() && f.index.angle_degrees < bend && f.middle.angle_degrees < bend && thumb_apart
}

/// Closed fist, thumb tucked against the bent fingers.
fn is_e(h: &HandFeatures, cfg: &GestureConfig) -> bool {
    let f = &h.fingers;
    f.all_bent()
        && f.index.angle_degrees < cfg.angles.bend
        && h.distances.thumb_index < cfg.distances.close
}

/// Only the pinky up.
fn is_i(h: &HandFeatures, cfg: &GestureConfig) -> bool {
    let f = &h.fingers;
    let pinky_raised = h.landmarks.pinky.tip.y < h.landmarks.middle.tip.y;

    f.index.bent && f.middle.bent && f.ring.bent && f.pinky.extended(&cfg.angles) && pinky_raised
}

/// Fingertips curled into a level ring that meets the thumb.
fn is_o(h: &HandFeatures, cfg: &GestureConfig) -> bool {
    let lm = &h.landmarks;
    let tip_heights = [lm.index.tip.y, lm.middle.tip.y, lm.ring.tip.y, lm.pinky.tip.y];

    h.distances.mean_adjacent_tip_distance() < cfg.distances.medium
        && !h.fingers.all_bent()
        && spread(&tip_heights) < cfg.tolerances.o_max_height_variation
}

/// Index and middle up and held together, ring and pinky folded.
fn is_u(h: &HandFeatures, cfg: &GestureConfig) -> bool {
    let f = &h.fingers;
    let lm = &h.landmarks;
    let level = (lm.index.tip.y - lm.middle.tip.y).abs() < cfg.tolerances.u_max_height_difference;

    f.index.extended(&cfg.angles)
        && f.middle.extended(&cfg.angles)
        && f.ring.bent
        && f.pinky.bent
        && h.distances.index_middle < cfg.distances.close
        && level
}

/// Stateless per-frame classifier. Thresholds are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct VowelClassifier {
    config: GestureConfig,
}

impl VowelClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The vowel order used to break ties.
    pub fn priority() -> [Vowel; 5] {
        RULES.map(|(vowel, _)| vowel)
    }

    pub fn classify(&self, points: &[Point3]) -> Result<Option<Vowel>> {
        let features = HandFeatures::evaluate(points, &self.config)?;
        Ok(self.classify_features(&features))
    }

    pub fn classify_features(&self, features: &HandFeatures) -> Option<Vowel> {
        let vowel = RULES
            .iter()
            .find(|(_, rule)| rule(features, &self.config))
            .map(|(vowel, _)| *vowel);

        debug!(
            index = features.fingers.index.angle_degrees,
            middle = features.fingers.middle.angle_degrees,
            ring = features.fingers.ring.angle_degrees,
            pinky = features.fingers.pinky.angle_degrees,
            thumb_index = features.distances.thumb_index,
            ?vowel,
            "classified hand"
        );
        vowel
    }

    /// Every vowel whose rule holds, in priority order.
    pub fn matching(&self, features: &HandFeatures) -> Vec<Vowel> {
        RULES
            .iter()
            .filter(|(_, rule)| rule(features, &self.config))
            .map(|(vowel, _)| *vowel)
            .collect()
    }
}
