//! Card page controller
//!
//! Owns the state machine of each card widget plus the resources the cards
//! share: one cake overlay, one audio element and one confetti container.
//!
//! ```text
//! Closed --open--> Revealing --reveal delay--> Open --close--> Closed
//!    \___________ open (no overlay) ___________/
//! ```

use super::confetti::ConfettiSession;
use super::state::{CardId, CardState, Key, Outcome, PageEvent};
use crate::platform::{AudioSink, CardView, ConfettiSurface, Overlay, Scheduler, Task};
use crate::settings::Settings;

/// One card widget and its state
struct CardSlot {
    id: CardId,
    state: CardState,
    view: Box<dyn CardView>,
    /// A click anywhere on the open card closes it
    close_on_click: bool,
}

/// Controller for the card page.
///
/// Every DOM target is optional: a missing card disables that card, a
/// missing overlay skips the reveal delay, missing audio or confetti skip
/// those effects.
pub struct CardPage {
    cards: Vec<CardSlot>,
    overlay: Option<Box<dyn Overlay>>,
    audio: Option<Box<dyn AudioSink>>,
    confetti: Option<ConfettiSession>,
    scheduler: Box<dyn Scheduler>,
    settings: Settings,
}

impl CardPage {
    pub fn new(scheduler: Box<dyn Scheduler>, settings: Settings) -> Self {
        Self {
            cards: Vec::new(),
            overlay: None,
            audio: None,
            confetti: None,
            scheduler,
            settings,
        }
    }

    /// Attach a card widget. Re-attaching an id replaces the old view.
    pub fn with_card(mut self, id: CardId, view: Box<dyn CardView>) -> Self {
        let close_on_click = match id {
            CardId::Primary => true,
            CardId::Secondary => self.settings.close_secondary_on_click,
        };
        self.cards.retain(|c| c.id != id);
        self.cards.push(CardSlot {
            id,
            state: CardState::Closed,
            view,
            close_on_click,
        });
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn Overlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_confetti(mut self, surface: Box<dyn ConfettiSurface>, seed: u64) -> Self {
        self.confetti = Some(ConfettiSession::new(surface, self.settings.confetti, seed));
        self
    }

    /// Current state of a card, `None` if the card is not on the page
    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.slot(id).map(|i| self.cards[i].state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn confetti(&self) -> Option<&ConfettiSession> {
        self.confetti.as_ref()
    }

    /// Apply a user input event
    pub fn handle(&mut self, event: PageEvent) -> Outcome {
        match event {
            PageEvent::OpenButton => {
                self.open(CardId::Primary);
                Outcome::default()
            }
            PageEvent::CloseButton(card) => {
                self.close(card);
                Outcome::consumed()
            }
            PageEvent::CardClick {
                card,
                on_close_button: true,
            } => {
                self.close(card);
                Outcome::consumed().with_prevent_default()
            }
            PageEvent::CardClick {
                card,
                on_close_button: false,
            } => {
                match self.state(card) {
                    Some(CardState::Closed) => self.open(card),
                    Some(CardState::Open) => {
                        if let Some(i) = self.slot(card)
                            && self.cards[i].close_on_click
                        {
                            self.close(card);
                        }
                    }
                    Some(CardState::Revealing) | None => {}
                }
                Outcome::default()
            }
            PageEvent::CardKey { card, key } => match key {
                Key::Escape => {
                    self.close(card);
                    Outcome::default()
                }
                Key::Enter | Key::Space => {
                    self.toggle(card);
                    Outcome::default().with_prevent_default()
                }
                Key::Other => Outcome::default(),
            },
        }
    }

    /// Deliver a fired scheduled task
    pub fn on_timer(&mut self, task: Task) {
        match task {
            Task::RevealComplete(card) => self.finish_reveal(card),
            Task::ConfettiTick { generation } => {
                if let Some(confetti) = self.confetti.as_mut() {
                    confetti.on_tick(generation, self.scheduler.as_mut());
                }
            }
            Task::ParticleExpired(id) => {
                if let Some(confetti) = self.confetti.as_mut() {
                    confetti.on_particle_expired(id);
                }
            }
        }
    }

    /// Closed -> Revealing, or straight to Open when there is no overlay
    pub fn open(&mut self, card: CardId) {
        let Some(i) = self.slot(card) else {
            log::debug!("No {} card on this page", card.as_str());
            return;
        };
        if self.cards[i].state != CardState::Closed {
            return;
        }

        match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.set_active(true);
                self.scheduler
                    .schedule(self.settings.reveal_delay_ms, Task::RevealComplete(card));
                self.cards[i].state = CardState::Revealing;
                log::info!("Revealing {} card", card.as_str());
            }
            None => self.enter_open(i),
        }
    }

    /// Open -> Closed. No-op on a closed or revealing card.
    pub fn close(&mut self, card: CardId) {
        let Some(i) = self.slot(card) else { return };

        match self.cards[i].state {
            CardState::Closed => {}
            // The pending reveal still settles the card open
            CardState::Revealing => {}
            CardState::Open => {
                let slot = &mut self.cards[i];
                slot.state = CardState::Closed;
                slot.view.set_open(false);
                if let Some(audio) = self.audio.as_mut() {
                    audio.pause();
                }
                if let Some(confetti) = self.confetti.as_mut() {
                    confetti.stop(self.scheduler.as_mut());
                }
                log::info!("Closed {} card", card.as_str());
            }
        }
    }

    /// Enter/Space behavior: open a closed card, close an open one
    pub fn toggle(&mut self, card: CardId) {
        match self.state(card) {
            Some(CardState::Closed) => self.open(card),
            Some(CardState::Open) => self.close(card),
            Some(CardState::Revealing) | None => {}
        }
    }

    fn finish_reveal(&mut self, card: CardId) {
        let Some(i) = self.slot(card) else { return };
        if self.cards[i].state != CardState::Revealing {
            return;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_active(false);
        }
        self.enter_open(i);
    }

    /// Effects of settling open, in order: open flag, music, confetti, scroll
    fn enter_open(&mut self, i: usize) {
        let slot = &mut self.cards[i];
        slot.state = CardState::Open;
        slot.view.set_open(true);

        if let Some(audio) = self.audio.as_mut() {
            audio.set_volume(self.settings.music_volume);
            if let Err(err) = audio.play() {
                log::warn!("Audio play failed (user interaction or policy): {}", err);
            }
        }
        if let Some(confetti) = self.confetti.as_mut() {
            confetti.start(self.scheduler.as_mut());
        }
        self.cards[i].view.scroll_into_view();
        log::info!("Opened {} card", self.cards[i].id.as_str());
    }

    fn slot(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}
