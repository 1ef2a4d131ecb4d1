//! Background music using the page's `<audio>` element
//!
//! Browsers may refuse `play()` until the user has interacted with the page.
//! A refusal arrives as a rejected promise and is only logged.

use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::error::PlaybackError;
use crate::platform::AudioSink;

/// Music player for the card page
pub struct BackgroundMusic {
    el: HtmlAudioElement,
}

impl BackgroundMusic {
    pub fn new(el: HtmlAudioElement) -> Self {
        Self { el }
    }
}

impl AudioSink for BackgroundMusic {
    fn set_volume(&mut self, volume: f64) {
        self.el.set_volume(volume.clamp(0.0, 1.0));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let promise = self
            .el
            .play()
            .map_err(|err| PlaybackError::Rejected(format!("{:?}", err)))?;

        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("Audio play failed (user interaction or policy): {:?}", err);
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.el.pause() {
            log::warn!("Audio pause failed: {:?}", err);
        }
    }
}
