// src/audio.rs - Edge-triggered playback of confirmed vowels
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::classifier::Vowel;
use crate::config::AudioConfig;
use crate::confirmation::HandId;
use crate::error::Result;

/// Playback backend. Decoding and output devices live behind this.
pub trait AudioPlayer {
    fn is_available(&self) -> bool {
        true
    }

    fn play(&mut self, vowel: Vowel, clip: &Path) -> Result<()>;
}

/// Logs each trigger instead of producing sound.
#[derive(Debug, Default)]
pub struct LogPlayer;

impl AudioPlayer for LogPlayer {
    fn play(&mut self, vowel: Vowel, clip: &Path) -> Result<()> {
        info!(%vowel, clip = %clip.display(), "play");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// A vowel became confirmed on this frame.
    Play(Vowel),
    /// The active gesture disappeared; the hand's confirmation stream should restart.
    Reset,
}

pub struct AudioTrigger {
    player: Box<dyn AudioPlayer>,
    config: AudioConfig,
    last_confirmed: HashMap<HandId, Vowel>,
}

impl AudioTrigger {
    pub fn new(config: AudioConfig, player: Box<dyn AudioPlayer>) -> Self {
        if config.enabled && !player.is_available() {
            warn!("audio player unavailable, vowel triggers will only be logged");
        }
        Self {
            player,
            config,
            last_confirmed: HashMap::new(),
        }
    }

    pub fn last_confirmed(&self, hand: HandId) -> Option<Vowel> {
        self.last_confirmed.get(&hand).copied()
    }

    /// Apply one frame's outcome for `hand`.
    ///
    /// Plays only when the confirmed vowel differs from the last one played for
    /// this hand. Returns `Reset` when a confirmed gesture was active and the
    /// raw detection has gone blank.
    pub fn update(
        &mut self,
        hand: HandId,
        detected: Option<Vowel>,
        confirmed: Option<Vowel>,
    ) -> Option<TriggerEvent> {
        let last = self.last_confirmed(hand);

        match confirmed {
            Some(vowel) if last != Some(vowel) => {
                self.last_confirmed.insert(hand, vowel);
                self.play(hand, vowel);
                Some(TriggerEvent::Play(vowel))
            }
            Some(_) => None,
            None if last.is_some() && detected.is_none() => {
                debug!(hand, "gesture released");
                self.last_confirmed.remove(&hand);
                Some(TriggerEvent::Reset)
            }
            None => None,
        }
    }

    pub fn forget(&mut self, hand: HandId) {
        self.last_confirmed.remove(&hand);
    }

    fn play(&mut self, hand: HandId, vowel: Vowel) {
        if !self.config.enabled || !self.player.is_available() {
            info!(hand, %vowel, "confirmed (audio off)");
            return;
        }

        let Some(clip) = self.config.clip_path(vowel) else {
            warn!(%vowel, "no audio clip configured");
            return;
        };

        info!(hand, %vowel, "playing {}", clip.display());
        if let Err(e) = self.player.play(vowel, &clip) {
            warn!(%vowel, "playback failed: {}", e);
        }
    }
}
