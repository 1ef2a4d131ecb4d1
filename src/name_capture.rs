//! Name page: save the birthday person's name and move on to the card
//!
//! Storage is best-effort. Navigation happens whether or not the write
//! succeeds.

use crate::consts::*;
use crate::platform::{KeyValueStore, Navigator};

/// Trim the submitted value, substituting the fallback name when blank
pub fn resolve_name(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Result of one form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub name: String,
    /// Whether the name reached the store
    pub stored: bool,
}

/// Name form controller
pub struct NameCapture<S: KeyValueStore, N: Navigator> {
    store: S,
    navigator: N,
}

impl<S: KeyValueStore, N: Navigator> NameCapture<S, N> {
    pub fn new(store: S, navigator: N) -> Self {
        Self { store, navigator }
    }

    /// Handle a form submission with the raw input value
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let name = resolve_name(raw);
        let stored = match self.store.set(NAME_KEY, &name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("localStorage not available: {}", err);
                false
            }
        };
        self.navigator.navigate(CARD_PAGE);
        SubmitOutcome { name, stored }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
