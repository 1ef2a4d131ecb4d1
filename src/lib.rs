//! Birthday Card - a small greeting page compiled to WebAssembly
//!
//! Core modules:
//! - `name_capture`: Name form submission, fallback and best-effort storage
//! - `card`: Card open/reveal/close state machine and confetti sessions
//! - `platform`: Capabilities the core drives (storage, audio, DOM, timers)
//! - `settings`: Tunable timings, volume and greeting source
//! - `web`: Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod card;
pub mod error;
pub mod name_capture;
pub mod platform;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use card::{CardId, CardPage, CardState, Key, Outcome, PageEvent, Propagation};
pub use error::{PlaybackError, StorageError};
pub use name_capture::{NameCapture, SubmitOutcome, resolve_name};
pub use settings::{GreetingSource, Settings};

/// Page configuration constants
pub mod consts {
    /// Storage key shared between the name page and the card page
    pub const NAME_KEY: &str = "birthdayPersonName";
    /// Stored when the name field is left blank
    pub const FALLBACK_NAME: &str = "Tanay";
    /// Relative target of the name form
    pub const CARD_PAGE: &str = "birthday.html";
    /// Name shown on the card when the greeting is fixed
    pub const GREETING_NAME: &str = "Charlie Shaine";

    /// Cake overlay on screen before the card settles open (ms)
    pub const REVEAL_DELAY_MS: u32 = 2500;
    /// Background music volume
    pub const MUSIC_VOLUME: f64 = 0.3;

    /// Nominal confetti fall time (ms); each piece falls for 0.7x..1.2x of it
    pub const CONFETTI_DURATION_MS: u32 = 4000;
    /// Pieces spawned per burst
    pub const CONFETTI_MAX_PIECES: u32 = 60;
    /// Time between spawned pieces (ms)
    pub const CONFETTI_SPAWN_INTERVAL_MS: u32 = 40;
    /// Grace period after a fall before the piece is removed (ms)
    pub const CONFETTI_REMOVAL_BUFFER_MS: u32 = 100;

    /// Confetti colors
    pub const CONFETTI_PALETTE: [&str; 7] = [
        "#e91e63", "#ff9800", "#ffeb3b", "#4caf50", "#2196f3", "#9c27b0", "#ff5722",
    ];
}
