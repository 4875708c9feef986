use dioxus::prelude::*;
use portfolio_core::presentation::Presentation;
use portfolio_core::{Cue, Notifier};
use std::rc::Rc;

#[derive(Clone)]
pub struct SoundBoard(pub Rc<WebAudioNotifier>);

impl SoundBoard {
    pub fn notifier(&self) -> Rc<dyn Notifier> {
        self.0.clone()
    }
}

pub fn use_sound_board() -> SoundBoard {
    use_context::<SoundBoard>()
}

pub fn use_notifier() -> Rc<dyn Notifier> {
    use_sound_board().notifier()
}

/// Sine-tone cues through Web Audio, audible only while sound is switched on.
/// A browser without an `AudioContext` simply stays quiet.
pub struct WebAudioNotifier {
    presentation: Signal<Presentation>,
    #[cfg(target_arch = "wasm32")]
    context: Option<web_sys::AudioContext>,
}

impl WebAudioNotifier {
    pub fn new(presentation: Signal<Presentation>) -> Self {
        Self {
            presentation,
            #[cfg(target_arch = "wasm32")]
            context: web_sys::AudioContext::new().ok(),
        }
    }

    fn enabled(&self) -> bool {
        self.presentation
            .try_peek()
            .map(|presentation| presentation.sound_enabled)
            .unwrap_or(false)
    }

    /// Browsers hand out suspended contexts until a user gesture.
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(context) = &self.context {
            if let Ok(promise) = context.resume() {
                wasm_bindgen_futures::spawn_local(async move {
                    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
                });
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn play(&self, cue: Cue) -> Result<(), wasm_bindgen::JsValue> {
        let Some(context) = &self.context else {
            return Ok(());
        };
        let tone = cue.tone();
        let oscillator = context.create_oscillator()?;
        let gain = context.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;
        oscillator.set_type(web_sys::OscillatorType::Sine);
        oscillator.frequency().set_value(tone.frequency_hz);

        let now = context.current_time();
        gain.gain().set_value_at_time(tone.volume, now)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, now + tone.duration_secs)?;
        oscillator.start_with_when(now)?;
        oscillator.stop_with_when(now + tone.duration_secs)?;
        Ok(())
    }
}

impl Notifier for WebAudioNotifier {
    fn notify(&self, cue: Cue) {
        if !self.enabled() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        if let Err(err) = self.play(cue) {
            tracing::debug!("sound: {cue:?} dropped: {err:?}");
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _cue = cue;
    }
}
