// src/tracking.rs - Per-frame driver: classify, confirm and trigger for every tracked hand
use std::collections::{HashSet, VecDeque};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::audio::{AudioPlayer, AudioTrigger, LogPlayer, TriggerEvent};
use crate::classifier::{HandFeatures, Vowel, VowelClassifier};
use crate::config::GestureConfig;
use crate::confirmation::{GestureConfirmer, HandId};
use crate::error::Result;
use crate::features::DistanceSet;
use crate::fingers::FingerStates;
use crate::mediapipe_bridge::{Handedness, LandmarkFrame, LandmarkSource};

const METRICS_WINDOW: usize = 30;

#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    pub avg_fps: f32,
    pub avg_processing_time: f32,
    frame_times: VecDeque<f32>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            avg_fps: 0.0,
            avg_processing_time: 0.0,
            frame_times: VecDeque::with_capacity(METRICS_WINDOW),
        }
    }

    fn record(&mut self, elapsed: f32) {
        self.frame_times.push_front(elapsed);
        if self.frame_times.len() > METRICS_WINDOW {
            self.frame_times.pop_back();
        }

        self.avg_processing_time =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.avg_fps = if self.avg_processing_time > 0.0 {
            1.0 / self.avg_processing_time
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandResult {
    pub index: HandId,
    pub handedness: Option<Handedness>,
    /// This frame's raw classification
    pub detected: Option<Vowel>,
    /// Set while the last N frames agree
    pub confirmed: Option<Vowel>,
    pub event: Option<TriggerEvent>,
    pub fingers: FingerStates,
    pub distances: DistanceSet,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    pub frame: u64,
    pub timestamp: f64,
    pub hands: Vec<HandResult>,
    /// Hands seen last frame that the tracker no longer reports
    pub lost_hands: Vec<HandId>,
}

pub struct VowelTracker {
    config: GestureConfig,
    classifier: VowelClassifier,
    confirmer: GestureConfirmer,
    trigger: AudioTrigger,
    active_hands: HashSet<HandId>,
    metrics: PerformanceMetrics,
    frame_counter: u64,
}

impl VowelTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_player(config, Box::new(LogPlayer))
    }

    pub fn with_player(config: GestureConfig, player: Box<dyn AudioPlayer>) -> Self {
        Self {
            classifier: VowelClassifier::new(config.clone()),
            confirmer: GestureConfirmer::new(config.detection.confirmation_frames),
            trigger: AudioTrigger::new(config.audio.clone(), player),
            active_hands: HashSet::new(),
            metrics: PerformanceMetrics::new(),
            frame_counter: 0,
            config,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn confirmer(&self) -> &GestureConfirmer {
        &self.confirmer
    }

    /// Process one tracker frame.
    ///
    /// Every hand's landmarks are validated before any state changes, so an
    /// invalid hand fails the whole frame without touching the buffers.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Result<FrameResult> {
        let start = Instant::now();
        let frame_number = self.frame_counter + 1;

        let mut seen = HashSet::new();
        let mut observed = Vec::with_capacity(frame.hands.len());
        for hand in &frame.hands {
            if observed.len() == self.config.detection.max_hands {
                warn!(frame = frame_number, hand = hand.index, "too many hands, ignoring");
                continue;
            }
            if !seen.insert(hand.index) {
                warn!(frame = frame_number, hand = hand.index, "duplicate hand index, ignoring");
                continue;
            }
            let features = HandFeatures::evaluate(&hand.points(), &self.config)?;
            observed.push((hand.index, hand.handedness, features));
        }
        self.frame_counter = frame_number;

        let mut result = FrameResult {
            frame: frame_number,
            timestamp: frame.timestamp,
            ..FrameResult::default()
        };

        for (index, handedness, features) in observed {
            result.hands.push(self.process_hand(index, handedness, &features));
        }

        let mut lost: Vec<HandId> = self.active_hands.difference(&seen).copied().collect();
        lost.sort_unstable();
        for hand in &lost {
            info!(hand, "hand lost");
            self.confirmer.forget(*hand);
            self.trigger.forget(*hand);
        }
        result.lost_hands = lost;
        self.active_hands = seen;

        self.metrics.record(start.elapsed().as_secs_f32());
        Ok(result)
    }

    fn process_hand(
        &mut self,
        index: HandId,
        handedness: Option<Handedness>,
        features: &HandFeatures,
    ) -> HandResult {
        let detected = self.classifier.classify_features(features);
        let confirmed = self.confirmer.confirm(index, detected);
        let event = self.trigger.update(index, detected, confirmed);

        if event == Some(TriggerEvent::Reset) {
            self.confirmer.reset(index);
        }
        debug!(hand = index, ?detected, ?confirmed, ?event, "hand processed");

        HandResult {
            index,
            handedness,
            detected,
            confirmed,
            event,
            fingers: features.fingers,
            distances: features.distances,
        }
    }

    /// Drain a landmark source, handing each result to `sink`. Returns the frame count.
    pub fn process_source<S, F>(&mut self, source: &mut S, mut sink: F) -> Result<usize>
    where
        S: LandmarkSource,
        F: FnMut(&FrameResult) -> Result<()>,
    {
        let mut frames = 0;
        while let Some(frame) = source.next_frame()? {
            let result = self.process_frame(&frame)?;
            sink(&result)?;
            frames += 1;
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GestureError;
    use crate::mediapipe_bridge::HandObservation;

    // Flat palm, all five digits straight and spread wide: matches no vowel
    fn open_hand(index: HandId) -> HandObservation {
        let mut landmarks = vec![[0.5, 0.9, 0.0]];
        for digit in 0..5 {
            let x = 0.2 + 0.15 * digit as f64;
            for joint in 0..4 {
                landmarks.push([x, 0.7 - 0.05 * joint as f64, 0.0]);
            }
        }
        HandObservation {
            index,
            handedness: Some(Handedness::Right),
            landmarks,
        }
    }

    fn frame(hands: Vec<HandObservation>) -> LandmarkFrame {
        LandmarkFrame { timestamp: 0.0, hands }
    }

    #[test]
    fn test_open_hand_detects_nothing() {
        let mut tracker = VowelTracker::new(GestureConfig::default());
        let result = tracker.process_frame(&frame(vec![open_hand(0)])).unwrap();
        assert_eq!(result.frame, 1);
        assert_eq!(result.hands.len(), 1);
        assert_eq!(result.hands[0].detected, None);
        assert_eq!(result.hands[0].confirmed, None);
        assert_eq!(tracker.confirmer().buffer_len(0), 1);
    }

    #[test]
    fn test_invalid_hand_fails_frame_without_side_effects() {
        let mut tracker = VowelTracker::new(GestureConfig::default());
        let mut bad = open_hand(1);
        bad.landmarks.truncate(20);

        let result = tracker.process_frame(&frame(vec![open_hand(0), bad]));
        assert!(matches!(result, Err(GestureError::InvalidInput(_))));
        assert_eq!(tracker.confirmer().buffer_len(0), 0);

        let next = tracker.process_frame(&frame(vec![open_hand(0)])).unwrap();
        assert_eq!(next.frame, 1);
    }

    #[test]
    fn test_lost_hand_is_forgotten() {
        let mut tracker = VowelTracker::new(GestureConfig::default());
        tracker.process_frame(&frame(vec![open_hand(0), open_hand(1)])).unwrap();
        let result = tracker.process_frame(&frame(vec![open_hand(1)])).unwrap();

        assert_eq!(result.lost_hands, vec![0]);
        assert_eq!(tracker.confirmer().buffer_len(0), 0);
        assert_eq!(tracker.confirmer().buffer_len(1), 2);
    }

    #[test]
    fn test_extra_and_duplicate_hands_ignored() {
        let mut config = GestureConfig::default();
        config.detection.max_hands = 2;
        let mut tracker = VowelTracker::new(config);

        let hands = vec![open_hand(0), open_hand(0), open_hand(1), open_hand(2)];
        let result = tracker.process_frame(&frame(hands)).unwrap();
        let indices: Vec<_> = result.hands.iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(tracker.confirmer().buffer_len(0), 1);
    }

    #[test]
    fn test_metrics_update() {
        let mut tracker = VowelTracker::new(GestureConfig::default());
        for _ in 0..40 {
            tracker.process_frame(&frame(vec![open_hand(0)])).unwrap();
        }
        assert_eq!(tracker.metrics().frame_times.len(), METRICS_WINDOW);
        assert!(tracker.metrics().avg_processing_time >= 0.0);
    }
}
