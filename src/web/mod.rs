//! Browser front-end
//!
//! Binds whichever page is loaded: the name page (`name-form`) or the card
//! page (`card`, `card-2`, `btn-open-card`). Both run from the same module.

pub mod browser;
pub mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::card::{CardId, CardPage, Key, Outcome, PageEvent, Propagation};
use crate::name_capture::NameCapture;
use crate::settings::Settings;
use browser::{
    DomConfetti, ElementCardView, ElementOverlay, LocalStore, LocationNavigator, TimerScheduler,
};
use dom::{CardElements, NameElements};

const CLOSE_BUTTON_SELECTOR: &str = ".btn-close-card";

/// Wire up the current document
pub fn run() -> Result<(), JsValue> {
    if let Some(els) = NameElements::bind() {
        bind_name_page(els)?;
        log::info!("Name page ready");
    }

    let els = CardElements::bind();
    if els.is_card_page() {
        bind_card_page(&els, Settings::load())?;
        log::info!("Card page ready");
    }
    Ok(())
}

fn bind_name_page(els: NameElements) -> Result<(), JsValue> {
    let mut capture = NameCapture::new(LocalStore::open(), LocationNavigator);
    let input = els.input;
    let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
        event.prevent_default();
        let outcome = capture.submit(&input.value());
        log::info!("Birthday name set to {} (stored: {})", outcome.name, outcome.stored);
    });
    els.form
        .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_card_page(els: &CardElements, settings: Settings) -> Result<(), JsValue> {
    if let Some(el) = &els.birthday_name {
        let name = settings.greeting_name(&LocalStore::open());
        el.set_text_content(Some(&name));
    }

    let scheduler = TimerScheduler::new();
    let seed = js_sys::Date::now() as u64;
    let mut page = CardPage::new(Box::new(scheduler.clone()), settings);

    if let Some(card) = &els.card {
        let view = ElementCardView::new(card.clone(), els.card_section.clone());
        page = page.with_card(CardId::Primary, Box::new(view));
    }
    if let Some(card) = &els.card_2 {
        let view = ElementCardView::new(card.clone(), els.card_section_2.clone());
        page = page.with_card(CardId::Secondary, Box::new(view));
    }
    if let Some(overlay) = &els.cake_overlay {
        page = page.with_overlay(Box::new(ElementOverlay::new(overlay.clone())));
    }
    if let Some(music) = &els.music {
        page = page.with_audio(Box::new(crate::audio::BackgroundMusic::new(music.clone())));
    }
    if let Some(container) = &els.confetti_container {
        page = page.with_confetti(Box::new(DomConfetti::new(container.clone())), seed);
    }

    let page = Rc::new(RefCell::new(page));
    {
        let weak = Rc::downgrade(&page);
        scheduler.set_dispatch(move |task| {
            if let Some(page) = weak.upgrade() {
                page.borrow_mut().on_timer(task);
            }
        });
    }

    if let Some(btn) = &els.btn_open_card {
        listen(btn, "click", &page, |_| Some(PageEvent::OpenButton))?;
    }
    if let Some(btn) = &els.btn_close_card {
        listen(btn, "click", &page, |_| {
            Some(PageEvent::CloseButton(CardId::Primary))
        })?;
    }
    if let Some(btn) = &els.btn_close_card_2 {
        listen(btn, "click", &page, |_| {
            Some(PageEvent::CloseButton(CardId::Secondary))
        })?;
    }
    for (card, el) in [(CardId::Primary, &els.card), (CardId::Secondary, &els.card_2)] {
        let Some(el) = el else { continue };
        listen(el, "click", &page, move |event| {
            Some(PageEvent::CardClick {
                card,
                on_close_button: dom::target_within(event, CLOSE_BUTTON_SELECTOR),
            })
        })?;
        listen(el, "keydown", &page, move |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            Some(PageEvent::CardKey {
                card,
                key: Key::from_dom(&key),
            })
        })?;
    }
    Ok(())
}

/// Route a DOM event into the page controller and apply its outcome
fn listen(
    target: &Element,
    kind: &str,
    page: &Rc<RefCell<CardPage>>,
    to_event: impl Fn(&Event) -> Option<PageEvent> + 'static,
) -> Result<(), JsValue> {
    let page = page.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
        let Some(page_event) = to_event(&event) else { return };
        let outcome = page.borrow_mut().handle(page_event);
        apply_outcome(&event, outcome);
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn apply_outcome(event: &Event, outcome: Outcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
    if outcome.propagation == Propagation::Stop {
        event.stop_propagation();
    }
}
