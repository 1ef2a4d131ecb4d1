//! Recording capability fakes shared by the card tests

use std::cell::RefCell;
use std::rc::Rc;

use super::{CardId, ConfettiParticle, ParticleId};
use crate::error::PlaybackError;
use crate::platform::{AudioSink, CardView, ConfettiSurface, Overlay};

/// Observable side effect
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CardOpen(CardId, bool),
    Scroll(CardId),
    Overlay(bool),
    Volume(f64),
    Play,
    Pause,
    ConfettiSpawn(ConfettiParticle),
    ConfettiRemove(ParticleId),
    ConfettiClear,
}

/// Shared, ordered record of effects
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Effect>>>);

impl Journal {
    pub fn push(&self, effect: Effect) {
        self.0.borrow_mut().push(effect);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Effect> {
        self.0.borrow().last().cloned()
    }

    /// Effects recorded from index `start` on
    pub fn since(&self, start: usize) -> Vec<Effect> {
        self.0.borrow()[start..].to_vec()
    }

    pub fn count(&self, pred: impl Fn(&Effect) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Effects without confetti spawn/remove noise
    pub fn milestones_since(&self, start: usize) -> Vec<Effect> {
        self.since(start)
            .into_iter()
            .filter(|e| !matches!(e, Effect::ConfettiSpawn(_) | Effect::ConfettiRemove(_)))
            .collect()
    }
}

pub struct RecordingCard {
    id: CardId,
    journal: Journal,
}

impl RecordingCard {
    pub fn new(id: CardId, journal: &Journal) -> Self {
        Self {
            id,
            journal: journal.clone(),
        }
    }
}

impl CardView for RecordingCard {
    fn set_open(&mut self, open: bool) {
        self.journal.push(Effect::CardOpen(self.id, open));
    }

    fn scroll_into_view(&mut self) {
        self.journal.push(Effect::Scroll(self.id));
    }
}

pub struct RecordingOverlay(pub Journal);

impl Overlay for RecordingOverlay {
    fn set_active(&mut self, active: bool) {
        self.0.push(Effect::Overlay(active));
    }
}

pub struct RecordingAudio {
    journal: Journal,
    reject: bool,
}

impl RecordingAudio {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            reject: false,
        }
    }

    /// Audio whose every play attempt is refused by policy
    pub fn rejecting(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            reject: true,
        }
    }
}

impl AudioSink for RecordingAudio {
    fn set_volume(&mut self, volume: f64) {
        self.journal.push(Effect::Volume(volume));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.journal.push(Effect::Play);
        if self.reject {
            return Err(PlaybackError::Rejected("NotAllowedError".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.journal.push(Effect::Pause);
    }
}

pub struct RecordingConfetti {
    journal: Journal,
}

impl RecordingConfetti {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl ConfettiSurface for RecordingConfetti {
    fn spawn(&mut self, particle: &ConfettiParticle) {
        self.journal.push(Effect::ConfettiSpawn(particle.clone()));
    }

    fn remove(&mut self, id: ParticleId) {
        self.journal.push(Effect::ConfettiRemove(id));
    }

    fn clear(&mut self) {
        self.journal.push(Effect::ConfettiClear);
    }
}
