// src/data.rs - Session export of per-hand classification results
use chrono::Local;
use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::audio::TriggerEvent;
use crate::classifier::Vowel;
use crate::error::{GestureError, Result};
use crate::tracking::{FrameResult, HandResult};

#[derive(Debug, Serialize)]
struct ClassificationRecord {
    timestamp: f64,
    frame: u64,
    hand: usize,
    handedness: Option<String>,
    detected: Option<String>,
    confirmed: Option<String>,

    // Finger flexion at PIP
    index_angle: f64,
    middle_angle: f64,
    ring_angle: f64,
    pinky_angle: f64,
    index_bent: bool,
    middle_bent: bool,
    ring_bent: bool,
    pinky_bent: bool,

    // Tip distances
    thumb_index: f64,
    index_middle: f64,
    middle_ring: f64,
    ring_pinky: f64,
    thumb_index_mcp: f64,
}

impl ClassificationRecord {
    fn new(result: &FrameResult, hand: &HandResult) -> Self {
        Self {
            timestamp: result.timestamp,
            frame: result.frame,
            hand: hand.index,
            handedness: hand.handedness.map(|h| format!("{:?}", h)),
            detected: hand.detected.map(|v| v.to_string()),
            confirmed: hand.confirmed.map(|v| v.to_string()),
            index_angle: hand.fingers.index.angle_degrees,
            middle_angle: hand.fingers.middle.angle_degrees,
            ring_angle: hand.fingers.ring.angle_degrees,
            pinky_angle: hand.fingers.pinky.angle_degrees,
            index_bent: hand.fingers.index.bent,
            middle_bent: hand.fingers.middle.bent,
            ring_bent: hand.fingers.ring.bent,
            pinky_bent: hand.fingers.pinky.bent,
            thumb_index: hand.distances.thumb_index,
            index_middle: hand.distances.index_middle,
            middle_ring: hand.distances.middle_ring,
            ring_pinky: hand.distances.ring_pinky,
            thumb_index_mcp: hand.distances.thumb_index_mcp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub total_frames: usize,
    pub hand_observations: usize,
    pub detections: usize,
    /// Frames on which each vowel became confirmed
    pub confirmations: BTreeMap<Vowel, usize>,
}

impl SessionSummary {
    pub fn detection_rate(&self) -> f64 {
        if self.hand_observations == 0 {
            return 0.0;
        }
        self.detections as f64 / self.hand_observations as f64
    }
}

fn validate_session_name(name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(GestureError::InvalidInput(format!("invalid session name {:?}", name)));
    }
    if name.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return Err(GestureError::InvalidInput(format!(
            "session name {:?} must not contain path separators",
            name
        )));
    }
    Ok(name)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct DataExporter {
    output_dir: PathBuf,
    session_name: String,
    results: Vec<FrameResult>,
}

impl DataExporter {
    /// Session names become a directory under `output_dir`, so they must be a
    /// single plain path component.
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Result<Self> {
        let session_name = match session_name {
            Some(name) => validate_session_name(name)?,
            None => format!("session_{}", Local::now().format("%Y%m%d_%H%M%S")),
        };

        Ok(Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
            results: Vec::new(),
        })
    }

    pub fn session_dir(&self) -> PathBuf {
        self.output_dir.join(&self.session_name)
    }

    pub fn add_frame(&mut self, result: FrameResult) {
        self.results.push(result);
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary {
            total_frames: self.results.len(),
            ..SessionSummary::default()
        };

        for hand in self.results.iter().flat_map(|r| r.hands.iter()) {
            summary.hand_observations += 1;
            if hand.detected.is_some() {
                summary.detections += 1;
            }
            if let Some(TriggerEvent::Play(vowel)) = hand.event {
                *summary.confirmations.entry(vowel).or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn export_csv(&self) -> Result<PathBuf> {
        let csv_path = self.session_dir().join("tracking_data.csv");
        std::fs::create_dir_all(self.session_dir())?;

        let file = File::create(&csv_path)?;
        let mut writer = Writer::from_writer(file);

        for result in &self.results {
            for hand in &result.hands {
                writer.serialize(ClassificationRecord::new(result, hand))?;
            }
        }

        writer.flush()?;
        info!(path = %csv_path.display(), "exported CSV");
        Ok(csv_path)
    }

    pub fn generate_report(&self) -> Result<PathBuf> {
        let report_path = self.session_dir().join("report.html");
        std::fs::create_dir_all(self.session_dir())?;

        std::fs::write(&report_path, self.create_html_report())?;
        info!(path = %report_path.display(), "wrote report");
        Ok(report_path)
    }

    fn create_html_report(&self) -> String {
        let summary = self.summary();
        let session = escape_html(&self.session_name);

        let rows: String = summary
            .confirmations
            .iter()
            .map(|(vowel, count)| {
                format!(
                    r#"        <div class="stat-item">
            <span class="stat-label">Vowel {}:</span>
            <span class="stat-value">{} confirmations</span>
        </div>
"#,
                    vowel, count
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Vowel Recognition Report - {}</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 40px; background: #f5f5f5; }}
        .stats {{ background: white; padding: 20px; border-radius: 8px; }}
        .stat-item {{ margin: 10px 0; }}
        .stat-label {{ font-weight: bold; color: #666; }}
        .stat-value {{ color: #4682EA; font-size: 1.2em; }}
    </style>
</head>
<body>
    <h1>Vowel Recognition Session Report</h1>
    <div class="stats">
        <h2>Session: {}</h2>
        <div class="stat-item">
            <span class="stat-label">Total Frames:</span>
            <span class="stat-value">{}</span>
        </div>
        <div class="stat-item">
            <span class="stat-label">Hand Observations:</span>
            <span class="stat-value">{}</span>
        </div>
        <div class="stat-item">
            <span class="stat-label">Detection Rate:</span>
            <span class="stat-value">{:.1}%</span>
        </div>
{}    </div>
</body>
</html>
"#,
            session,
            session,
            summary.total_frames,
            summary.hand_observations,
            summary.detection_rate() * 100.0,
            rows
        )
    }
}
