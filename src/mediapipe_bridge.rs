// src/mediapipe_bridge.rs - Boundary with the external hand landmark tracker
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::confirmation::HandId;
use crate::error::{GestureError, Result};
use crate::geometry::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand as reported by the tracker. Handedness is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub index: HandId,
    #[serde(default)]
    pub handedness: Option<Handedness>,
    pub landmarks: Vec<[f64; 3]>,
}

impl HandObservation {
    pub fn points(&self) -> Vec<Point3> {
        self.landmarks
            .iter()
            .map(|lm| Point3::new(lm[0], lm[1], lm[2]))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

/// Anything that yields tracker output frame by frame. `Ok(None)` ends the stream.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// Replays tracker output recorded as JSON Lines, one [`LandmarkFrame`] per line.
pub struct RecordedSource<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl RecordedSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordedSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> LandmarkSource for RecordedSource<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf);
            if matches!(read, Ok(0)) {
                return Ok(None);
            }
            self.line_number += 1;
            read.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => GestureError::Source {
                    line: self.line_number,
                    message: e.to_string(),
                },
                _ => GestureError::Io(e),
            })?;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| GestureError::Source {
                    line: self.line_number,
                    message: e.to_string(),
                });
        }
    }
}

impl<R: BufRead> Iterator for RecordedSource<R> {
    type Item = Result<LandmarkFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
