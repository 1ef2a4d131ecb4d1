//! Card states and the input events that drive them

use serde::{Deserialize, Serialize};

/// Which card widget on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardId {
    /// The main card, opened by the open-card button
    Primary,
    /// Optional second card further down the page
    Secondary,
}

impl CardId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardId::Primary => "primary",
            CardId::Secondary => "secondary",
        }
    }
}

/// Open/closed state of one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Closed,
    /// Cake overlay showing; advances to `Open` on its own
    Revealing,
    Open,
}

/// Keys the card reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// User input delivered to the page controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The dedicated open-card button
    OpenButton,
    /// A card's own close button
    CloseButton(CardId),
    /// A click landing on a card. `on_close_button` is set when the click
    /// target sits inside one of the card's close buttons.
    CardClick { card: CardId, on_close_button: bool },
    /// A keydown on a card
    CardKey { card: CardId, key: Key },
}

/// Whether an event may continue on to enclosing handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    /// Consumed here; enclosing toggle handlers must not see it
    Stop,
}

/// What the host should do with the originating DOM event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub propagation: Propagation,
    pub prevent_default: bool,
}

impl Outcome {
    /// Event consumed by a close trigger
    pub fn consumed() -> Self {
        Self {
            propagation: Propagation::Stop,
            prevent_default: false,
        }
    }

    pub fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}
