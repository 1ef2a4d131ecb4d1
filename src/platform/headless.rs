//! Log-only page targets for running the controllers without a browser

use super::{AudioSink, CardView, ConfettiSurface, Navigator, Overlay};
use crate::card::{CardId, ConfettiParticle, ParticleId};
use crate::error::PlaybackError;

/// Card that logs its visual changes
pub struct HeadlessCard {
    id: CardId,
}

impl HeadlessCard {
    pub fn new(id: CardId) -> Self {
        Self { id }
    }
}

impl CardView for HeadlessCard {
    fn set_open(&mut self, open: bool) {
        log::info!("[{}] is-open={} aria-expanded={}", self.id.as_str(), open, open);
    }

    fn scroll_into_view(&mut self) {
        log::info!("[{}] scroll into view", self.id.as_str());
    }
}

pub struct HeadlessOverlay;

impl Overlay for HeadlessOverlay {
    fn set_active(&mut self, active: bool) {
        log::info!("[cake] is-active={}", active);
    }
}

/// Audio that tracks whether it would be playing
#[derive(Default)]
pub struct HeadlessAudio {
    volume: f64,
    playing: bool,
}

impl AudioSink for HeadlessAudio {
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.playing = true;
        log::info!("[music] playing at {:.0}%", self.volume * 100.0);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            log::info!("[music] paused");
        }
        self.playing = false;
    }
}

/// Confetti container that counts its pieces
#[derive(Default)]
pub struct HeadlessConfetti {
    live: usize,
    total: usize,
}

impl ConfettiSurface for HeadlessConfetti {
    fn spawn(&mut self, particle: &ConfettiParticle) {
        self.live += 1;
        self.total += 1;
        log::debug!(
            "[confetti] piece {} at {:.1}% {} falling {:.0}ms",
            particle.id.0,
            particle.left_percent,
            particle.color,
            particle.fall_ms
        );
    }

    fn remove(&mut self, _id: ParticleId) {
        self.live = self.live.saturating_sub(1);
    }

    fn clear(&mut self) {
        if self.live > 0 {
            log::info!("[confetti] cleared {} of {} pieces", self.live, self.total);
        }
        self.live = 0;
    }
}

pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, target: &str) {
        log::info!("Navigate to {}", target);
    }
}
