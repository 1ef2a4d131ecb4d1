//! Platform abstraction layer
//!
//! The card and name-capture logic never touch the browser directly. They
//! drive these capabilities instead:
//! - Storage (LocalStorage on web)
//! - Navigation
//! - Background audio
//! - Card, overlay and confetti DOM targets
//! - Cancelable scheduled tasks (setTimeout on web)
//!
//! `manual` provides a virtual clock and in-memory store for native runs and
//! tests; `headless` provides log-only targets for the native rehearsal.

pub mod headless;
pub mod manual;

pub use manual::{ManualScheduler, MemoryStore};

use crate::card::{CardId, ConfettiParticle, ParticleId};
use crate::error::{PlaybackError, StorageError};

/// Best-effort key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Page navigation
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

/// Background music output
pub trait AudioSink {
    fn set_volume(&mut self, volume: f64);
    /// Start playback. Rejection is non-fatal to the caller.
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
}

/// Visual state of one card widget
pub trait CardView {
    /// Mark the card open or closed (visual state and expanded flag)
    fn set_open(&mut self, open: bool);
    /// Bring the card's section into view
    fn scroll_into_view(&mut self);
}

/// Cake-reveal overlay
pub trait Overlay {
    fn set_active(&mut self, active: bool);
}

/// Container that hosts confetti particles
pub trait ConfettiSurface {
    fn spawn(&mut self, particle: &ConfettiParticle);
    fn remove(&mut self, id: ParticleId);
    /// Remove every particle currently in the container
    fn clear(&mut self);
}

/// Work a scheduler hands back to the page controller when its delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Cake overlay finished; the card settles open
    RevealComplete(CardId),
    /// Spawn the next confetti piece of the given session
    ConfettiTick { generation: u64 },
    /// A confetti piece finished falling
    ParticleExpired(ParticleId),
}

/// Handle to a pending scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// One-shot, cancelable scheduled tasks
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle;
    /// Cancel a pending task. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}
