//! Birthday Card entry point
//!
//! On the web this binds the loaded page. Natively it runs a headless
//! rehearsal of the name page and card page on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", err).into());
    }

    log::info!("Birthday card starting...");
    birthday_card::web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Birthday card (native) starting...");
    log::info!("Native mode is a headless rehearsal - serve the wasm build for the real page");

    let name = std::env::args().nth(1).unwrap_or_default();
    rehearse(&name);
}

/// Submit a name, open the card, let the party run, close it
#[cfg(not(target_arch = "wasm32"))]
fn rehearse(name: &str) {
    use birthday_card::platform::headless::{
        HeadlessAudio, HeadlessCard, HeadlessConfetti, HeadlessOverlay, LogNavigator,
    };
    use birthday_card::platform::{ManualScheduler, MemoryStore};
    use birthday_card::{CardId, CardPage, GreetingSource, NameCapture, PageEvent, Settings};

    let mut capture = NameCapture::new(MemoryStore::new(), LogNavigator);
    let outcome = capture.submit(name);
    log::info!("Stored name: {}", outcome.name);

    let settings = Settings {
        greeting: GreetingSource::Stored,
        ..Settings::load()
    };
    log::info!(
        "Greeting ({}): Happy Birthday, {}!",
        settings.greeting.as_str(),
        settings.greeting_name(capture.store())
    );

    let clock = ManualScheduler::new();
    let mut page = CardPage::new(Box::new(clock.clone()), settings)
        .with_card(CardId::Primary, Box::new(HeadlessCard::new(CardId::Primary)))
        .with_overlay(Box::new(HeadlessOverlay))
        .with_audio(Box::new(HeadlessAudio::default()))
        .with_confetti(Box::new(HeadlessConfetti::default()), 0x5eed);

    page.handle(PageEvent::OpenButton);
    clock.run_for(7_000, |task| page.on_timer(task));
    log::info!("Card state after 7s: {:?}", page.state(CardId::Primary));

    page.handle(PageEvent::CloseButton(CardId::Primary));
    log::info!("Card state after close: {:?}", page.state(CardId::Primary));
}
