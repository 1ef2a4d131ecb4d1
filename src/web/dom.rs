//! DOM element bindings
//!
//! All elements are resolved once at startup. Each one is optional; a page
//! only carries the elements it needs.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlAudioElement, HtmlInputElement};

fn doc() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

/// Whether the event target sits inside an element matching `selector`
pub fn target_within(event: &Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Elements of the name page
pub struct NameElements {
    pub form: Element,
    pub input: HtmlInputElement,
}

impl NameElements {
    pub fn bind() -> Option<Self> {
        Some(Self {
            form: by_id("name-form")?,
            input: by_id_typed("birthday-name-input")?,
        })
    }
}

/// Elements of the card page
#[derive(Default)]
pub struct CardElements {
    pub btn_open_card: Option<Element>,
    pub btn_close_card: Option<Element>,
    pub btn_close_card_2: Option<Element>,
    pub card: Option<Element>,
    pub card_2: Option<Element>,
    pub card_section: Option<Element>,
    pub card_section_2: Option<Element>,
    pub birthday_name: Option<Element>,
    pub music: Option<HtmlAudioElement>,
    pub confetti_container: Option<Element>,
    pub cake_overlay: Option<Element>,
}

impl CardElements {
    pub fn bind() -> Self {
        Self {
            btn_open_card: by_id("btn-open-card"),
            btn_close_card: by_id("btn-close-card"),
            btn_close_card_2: by_id("btn-close-card-2"),
            card: by_id("card"),
            card_2: by_id("card-2"),
            card_section: by_id("card-section"),
            card_section_2: by_id("card-section-2"),
            birthday_name: by_id("birthday-name"),
            music: by_id_typed("birthday-music"),
            confetti_container: by_id("confetti-container"),
            cake_overlay: by_id("cake-overlay"),
        }
    }

    /// Whether this document is a card page at all
    pub fn is_card_page(&self) -> bool {
        self.card.is_some() || self.card_2.is_some() || self.btn_open_card.is_some()
    }
}
