//! Fingerspelling vowel recognition from MediaPipe-style hand landmarks.
//!
//! Each frame's 21 landmarks are turned into finger flexion and fingertip
//! distance features, matched against the A/E/I/O/U hand-shape rules, and
//! debounced per hand before a confirmed vowel triggers audio.

pub mod audio;
pub mod classifier;
pub mod config;
pub mod confirmation;
pub mod data;
pub mod error;
pub mod features;
pub mod fingers;
pub mod geometry;
pub mod landmarks;
pub mod mediapipe_bridge;
pub mod tracking;

pub use audio::{AudioPlayer, AudioTrigger, LogPlayer, TriggerEvent};
pub use classifier::{HandFeatures, Vowel, VowelClassifier};
pub use config::GestureConfig;
pub use confirmation::{ConfirmationBuffer, GestureConfirmer, HandId};
pub use data::{DataExporter, SessionSummary};
pub use error::{GestureError, Result};
pub use features::DistanceSet;
pub use fingers::{FingerState, FingerStates};
pub use geometry::Point3;
pub use landmarks::{extract, NamedLandmarks};
pub use mediapipe_bridge::{HandObservation, Handedness, LandmarkFrame, LandmarkSource, RecordedSource};
pub use tracking::{FrameResult, HandResult, PerformanceMetrics, VowelTracker};
