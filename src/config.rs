// src/config.rs - Thresholds and tolerances for vowel detection
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classifier::Vowel;
use crate::error::{GestureError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub angles: AngleThresholds,
    pub distances: DistanceThresholds,
    pub tolerances: GestureTolerances,
    pub detection: DetectionConfig,
    pub audio: AudioConfig,
}

/// Degrees at the PIP joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleThresholds {
    /// Below this a finger can count as bent
    pub bend: f64,
    /// Above this a finger counts as extended
    pub extend: f64,
    /// MCP->TIP chord over MCP->PIP->TIP path must stay under this for a bend
    pub bend_chord_ratio: f64,
}

impl Default for AngleThresholds {
    fn default() -> Self {
        Self {
            bend: 140.0,
            extend: 160.0,
            bend_chord_ratio: 0.95,
        }
    }
}

/// Normalized image units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceThresholds {
    pub very_close: f64,
    pub close: f64,
    pub medium: f64,
    pub far: f64,
}

impl Default for DistanceThresholds {
    fn default() -> Self {
        Self {
            very_close: 0.04,
            close: 0.08,
            medium: 0.12,
            far: 0.18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTolerances {
    /// Max spread of the four fingertip heights for O
    pub o_max_height_variation: f64,
    /// Max |index_tip.y - middle_tip.y| for U
    pub u_max_height_difference: f64,
}

impl Default for GestureTolerances {
    fn default() -> Self {
        Self {
            o_max_height_variation: 0.08,
            u_max_height_difference: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Consecutive identical frames needed to confirm a vowel
    pub confirmation_frames: usize,
    pub max_hands: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confirmation_frames: 3,
            max_hands: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub clip_dir: PathBuf,
    pub clips: BTreeMap<Vowel, String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let clips = [
            (Vowel::A, "A.WAV"),
            (Vowel::E, "e.mp3"),
            (Vowel::I, "i.mp3"),
            (Vowel::O, "o.mp3"),
            (Vowel::U, "u.mp3"),
        ]
        .into_iter()
        .map(|(vowel, file)| (vowel, file.to_string()))
        .collect();

        Self {
            enabled: true,
            clip_dir: PathBuf::from("sounds"),
            clips,
        }
    }
}

impl AudioConfig {
    pub fn clip_path(&self, vowel: Vowel) -> Option<PathBuf> {
        self.clips.get(&vowel).map(|file| self.clip_dir.join(file))
    }
}

impl GestureConfig {
    /// Load and validate a JSON configuration file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GestureError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| GestureError::Config(format!("parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("angles.bend", self.angles.bend),
            ("angles.extend", self.angles.extend),
            ("angles.bend_chord_ratio", self.angles.bend_chord_ratio),
            ("distances.very_close", self.distances.very_close),
            ("distances.close", self.distances.close),
            ("distances.medium", self.distances.medium),
            ("distances.far", self.distances.far),
            ("tolerances.o_max_height_variation", self.tolerances.o_max_height_variation),
            ("tolerances.u_max_height_difference", self.tolerances.u_max_height_difference),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GestureError::Config(format!("{} must be positive, got {}", field, value)));
            }
        }

        if self.angles.bend >= self.angles.extend || self.angles.extend > 180.0 {
            return Err(GestureError::Config(format!(
                "expected bend < extend <= 180, got bend={} extend={}",
                self.angles.bend, self.angles.extend
            )));
        }

        if self.detection.confirmation_frames == 0 {
            return Err(GestureError::Config("detection.confirmation_frames must be at least 1".into()));
        }
        if self.detection.max_hands == 0 {
            return Err(GestureError::Config("detection.max_hands must be at least 1".into()));
        }

        Ok(())
    }
}
