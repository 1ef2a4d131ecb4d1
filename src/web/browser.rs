//! Browser implementations of the platform capabilities

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Storage};

use crate::card::{ConfettiParticle, ParticleId};
use crate::error::StorageError;
use crate::platform::{
    CardView, ConfettiSurface, KeyValueStore, Navigator, Overlay, Scheduler, Task, TaskHandle,
};

/// `window.localStorage`, if the browser allows it
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("localStorage not available");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|err| StorageError::Rejected(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected(format!("{:?}", err)))
    }
}

/// Navigates by assigning `window.location.href`
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&mut self, target: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(err) = window.location().set_href(target) {
            log::warn!("Navigation to {} failed: {:?}", target, err);
        }
    }
}

/// Card element plus the section scrolled to when it opens
pub struct ElementCardView {
    card: Element,
    section: Option<Element>,
}

impl ElementCardView {
    pub fn new(card: Element, section: Option<Element>) -> Self {
        Self { card, section }
    }
}

impl CardView for ElementCardView {
    fn set_open(&mut self, open: bool) {
        let _ = self.card.class_list().toggle_with_force("is-open", open);
        let _ = self
            .card
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }

    fn scroll_into_view(&mut self) {
        if let Some(section) = &self.section {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            section.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    }
}

/// Cake overlay element
pub struct ElementOverlay {
    el: Element,
}

impl ElementOverlay {
    pub fn new(el: Element) -> Self {
        Self { el }
    }
}

impl Overlay for ElementOverlay {
    fn set_active(&mut self, active: bool) {
        let _ = self.el.class_list().toggle_with_force("is-active", active);
    }
}

/// Confetti container; pieces are `div.confetti-piece` animated by CSS
pub struct DomConfetti {
    container: Element,
    pieces: HashMap<ParticleId, Element>,
}

impl DomConfetti {
    pub fn new(container: Element) -> Self {
        Self {
            container,
            pieces: HashMap::new(),
        }
    }
}

impl ConfettiSurface for DomConfetti {
    fn spawn(&mut self, particle: &ConfettiParticle) {
        let Some(document) = self.container.owner_document() else { return };
        let piece = match document.create_element("div") {
            Ok(piece) => piece,
            Err(err) => {
                log::warn!("Could not create confetti piece: {:?}", err);
                return;
            }
        };
        piece.set_class_name("confetti-piece");
        if let Some(html) = piece.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("left", &format!("{}%", particle.left_percent));
            let _ = style.set_property("background-color", particle.color);
            let _ = style.set_property("animation-duration", &format!("{}ms", particle.fall_ms));
            let _ = style.set_property("animation-name", "confetti-fall");
        }
        if self.container.append_child(&piece).is_ok() {
            self.pieces.insert(particle.id, piece);
        }
    }

    fn remove(&mut self, id: ParticleId) {
        if let Some(piece) = self.pieces.remove(&id) {
            piece.remove();
        }
    }

    fn clear(&mut self) {
        self.container.set_inner_html("");
        self.pieces.clear();
    }
}

type Dispatch = Rc<RefCell<Option<Box<dyn Fn(Task)>>>>;

/// Handle -> browser timeout id and the callback it owns
type Pending = Rc<RefCell<HashMap<u64, (i32, Closure<dyn FnMut()>)>>>;

/// `setTimeout`-backed scheduler.
///
/// Clones share state. Fired tasks go to the function given to
/// `set_dispatch`, normally the page controller.
#[derive(Clone, Default)]
pub struct TimerScheduler {
    next: Rc<Cell<u64>>,
    /// Tasks that have neither fired nor been cancelled. Removing an entry
    /// frees its callback.
    pending: Pending,
    dispatch: Dispatch,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dispatch(&self, dispatch: impl Fn(Task) + 'static) {
        *self.dispatch.borrow_mut() = Some(Box::new(dispatch));
    }
}

impl Scheduler for TimerScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        let key = self.next.get();
        self.next.set(key + 1);

        let pending = self.pending.clone();
        let dispatch = self.dispatch.clone();
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            // Released after dispatch; wasm-bindgen defers the free until the call returns
            let fired = pending.borrow_mut().remove(&key);
            if let Some(dispatch) = dispatch.borrow().as_ref() {
                dispatch(task);
            }
            drop(fired);
        });

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let id = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .ok()
        });
        match id {
            Some(id) => {
                self.pending.borrow_mut().insert(key, (id, callback));
            }
            None => log::warn!("setTimeout failed, dropping {:?}", task),
        }
        TaskHandle(key)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let Some((id, _callback)) = self.pending.borrow_mut().remove(&handle.0) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(id);
        }
    }
}
