//! Sound cue queue
//!
//! The lock never plays audio itself. Requested effects are queued with their
//! effective volume and the host drains them into whatever backend it has.

use std::collections::VecDeque;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Dial passed a detent
    Click,
    /// Vault door swings open
    DoorOpen,
}

impl SoundEffect {
    /// Asset the host should play
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Click => "sounds/clickSound.wav",
            SoundEffect::DoorOpen => "sounds/openDoor.wav",
        }
    }
}

/// A queued sound with the volume it should play at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Mute-aware queue of pending sounds
#[derive(Debug, Clone)]
pub struct AudioCues {
    pending: VecDeque<SoundCue>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCues {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect; silent cues are dropped
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        // A replayed cue restarts the sound, so only the latest matters
        self.pending.retain(|cue| cue.effect != effect);
        self.pending.push_back(SoundCue { effect, volume });
    }

    /// Take all pending cues, oldest first
    pub fn drain(&mut self) -> Vec<SoundCue> {
        self.pending.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
