// src/confirmation.rs - Per-hand debounce of raw classifications
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::classifier::Vowel;

/// Stable per-hand handle supplied by the landmark tracker.
pub type HandId = usize;

/// Fixed-capacity ring of the most recent raw labels, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ConfirmationBuffer {
    entries: Box<[Option<Vowel>]>,
    /// Next slot to write
    write_index: usize,
    len: usize,
}

impl ConfirmationBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)].into_boxed_slice(),
            write_index: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn push(&mut self, label: Option<Vowel>) {
        self.entries[self.write_index] = label;
        self.write_index = (self.write_index + 1) % self.capacity();
        self.len = (self.len + 1).min(self.capacity());
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Option<Vowel>> + '_ {
        let cap = self.capacity();
        let start = (self.write_index + cap - self.len) % cap;
        (0..self.len).map(move |i| self.entries[(start + i) % cap])
    }

    /// The shared label when the buffer is full and every entry is the same vowel.
    pub fn confirmed(&self) -> Option<Vowel> {
        if !self.is_full() {
            return None;
        }
        let mut labels = self.iter();
        let first = labels.next()??;
        labels.all(|label| label == Some(first)).then_some(first)
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.write_index = 0;
        self.len = 0;
    }
}

/// Tracks one confirmation buffer per hand. Buffers are created on first sight
/// of a hand and only dropped through [`GestureConfirmer::forget`].
#[derive(Debug, Clone)]
pub struct GestureConfirmer {
    window: usize,
    buffers: HashMap<HandId, ConfirmationBuffer>,
}

impl GestureConfirmer {
    /// `window` is the number of identical consecutive frames needed; zero is treated as one.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            buffers: HashMap::new(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Record this frame's raw label for `hand` and report the confirmed vowel, if any.
    pub fn confirm(&mut self, hand: HandId, label: Option<Vowel>) -> Option<Vowel> {
        let window = self.window;
        let buffer = self
            .buffers
            .entry(hand)
            .or_insert_with(|| ConfirmationBuffer::new(window));

        buffer.push(label);
        let confirmed = buffer.confirmed();
        trace!(hand, ?label, len = buffer.len(), ?confirmed, "confirmation buffer updated");
        confirmed
    }

    /// Restart the hand's gesture stream.
    pub fn reset(&mut self, hand: HandId) {
        if let Some(buffer) = self.buffers.get_mut(&hand) {
            debug!(hand, "confirmation buffer reset");
            buffer.clear();
        }
    }

    /// Drop all state for a hand that is no longer tracked.
    pub fn forget(&mut self, hand: HandId) {
        self.buffers.remove(&hand);
    }

    pub fn buffer_len(&self, hand: HandId) -> usize {
        self.buffers.get(&hand).map_or(0, |b| b.len())
    }

    pub fn history(&self, hand: HandId) -> Vec<Option<Vowel>> {
        self.buffers
            .get(&hand)
            .map(|b| b.iter().collect())
            .unwrap_or_default()
    }

    pub fn tracked_hands(&self) -> impl Iterator<Item = HandId> + '_ {
        self.buffers.keys().copied()
    }
}
