//! Card interaction controller
//!
//! All card behavior lives here and is platform-free:
//! - Timer-driven transitions only (no blocking waits)
//! - Seeded RNG only (confetti placement)
//! - Side effects go through the `platform` capabilities

pub mod confetti;
pub mod page;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use confetti::{ConfettiParams, ConfettiParticle, ConfettiSession, ParticleId};
pub use page::CardPage;
pub use state::{CardId, CardState, Key, Outcome, PageEvent, Propagation};
