use dioxus::prelude::*;
use portfolio_core::glitch::{
    Ambient, Flicker, FlickerOptions, GlitchController, GlitchPhase, PhaseTiming, SignalGlitch,
};
use portfolio_core::Runner;
use std::cell::RefCell;
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::machines::frame_sink;
use crate::sounds::use_notifier;
use crate::timers::{app_scheduler, entropy_seed, ms, AppScheduler};

type SharedController<M> = Rc<RefCell<GlitchController<M, AppScheduler>>>;

#[cfg(target_arch = "wasm32")]
struct MotionListeners {
    media: Option<web_sys::MediaQueryList>,
    on_media: Rc<Closure<dyn FnMut(web_sys::MediaQueryListEvent)>>,
    on_visibility: Rc<Closure<dyn FnMut(web_sys::Event)>>,
}

#[component]
pub fn AmbientGlitch(#[props(default = 22_000)] interval_ms: u64) -> Element {
    let glitching = use_ambient(move || {
        Flicker::new(FlickerOptions {
            interval: ms(interval_ms),
            seed: entropy_seed(),
            ..FlickerOptions::default()
        })
    });

    if !glitching() {
        return rsx! {};
    }
    rsx! {
        div { class: "ambient-glitch-overlay", aria_hidden: "true",
            div { class: "ambient-scanline" }
            div { class: "ambient-noise" }
        }
    }
}

#[component]
pub fn SignalGlitchOverlay(#[props(default = 2_000)] duration_ms: u64) -> Element {
    let phase = use_ambient(move || {
        SignalGlitch::with_default_pattern(PhaseTiming::with_total(ms(duration_ms)))
    });

    let phase = phase();
    if phase == GlitchPhase::Idle {
        return rsx! {};
    }
    rsx! {
        div { class: "signal-glitch-overlay signal-glitch-{phase.as_str()}", aria_hidden: "true",
            div { class: "signal-interference-lines" }
            div { class: "signal-noise-layer" }
            div { class: "signal-phosphor-glow" }
        }
    }
}

/// Runs an ambient effect for the lifetime of the calling component, gated on
/// reduced motion and page visibility.
fn use_ambient<M: Ambient>(init: impl FnOnce() -> M) -> Signal<M::Frame> {
    let notifier = use_notifier();
    let (frame, controller) = use_hook(move || {
        let machine = init();
        let frame = Signal::new(machine.frame());
        let runner =
            Runner::new(machine, app_scheduler(), notifier).on_frame(frame_sink(frame));
        let controller = GlitchController::new(runner, prefers_reduced_motion());
        (frame, Rc::new(RefCell::new(controller)))
    });
    use_motion_gate(controller);
    frame
}

fn use_motion_gate<M: Ambient>(controller: SharedController<M>) {
    #[cfg(target_arch = "wasm32")]
    let mut listeners = use_signal(|| None::<MotionListeners>);
    #[cfg(not(target_arch = "wasm32"))]
    let _listeners = ();

    let starter = controller.clone();
    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            if listeners.peek().is_some() {
                return;
            }
            tracing::debug!("glitch: attach motion listeners");
            listeners.set(attach_listeners(starter.clone()));
        }
        starter.borrow().start();
    });

    use_drop(move || {
        #[cfg(target_arch = "wasm32")]
        if let Ok(binding) = listeners.try_peek() {
            if let Some(attached) = binding.as_ref() {
                detach_listeners(attached);
            }
        }
        controller.borrow().teardown();
    });
}

#[cfg(target_arch = "wasm32")]
fn attach_listeners<M: Ambient>(controller: SharedController<M>) -> Option<MotionListeners> {
    use portfolio_core::glitch::REDUCED_MOTION_QUERY;

    let window = web_sys::window()?;
    let document = window.document()?;

    let media_controller = controller.clone();
    let on_media = Rc::new(Closure::wrap(Box::new(move |event: web_sys::MediaQueryListEvent| {
        tracing::debug!("glitch: reduced motion {}", event.matches());
        media_controller.borrow_mut().set_reduced_motion(event.matches());
    }) as Box<dyn FnMut(_)>));
    let media = window.match_media(REDUCED_MOTION_QUERY).ok().flatten();
    if let Some(media) = &media {
        let _ = media
            .add_event_listener_with_callback("change", on_media.as_ref().as_ref().unchecked_ref());
    }

    let visibility_controller = controller;
    let on_visibility = Rc::new(Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let hidden = web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.hidden())
            .unwrap_or(false);
        visibility_controller.borrow_mut().set_page_visible(!hidden);
    }) as Box<dyn FnMut(_)>));
    let _ = document.add_event_listener_with_callback(
        "visibilitychange",
        on_visibility.as_ref().as_ref().unchecked_ref(),
    );

    Some(MotionListeners {
        media,
        on_media,
        on_visibility,
    })
}

#[cfg(target_arch = "wasm32")]
fn detach_listeners(listeners: &MotionListeners) {
    if let Some(media) = &listeners.media {
        let _ = media.remove_event_listener_with_callback(
            "change",
            listeners.on_media.as_ref().as_ref().unchecked_ref(),
        );
    }
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        let _ = document.remove_event_listener_with_callback(
            "visibilitychange",
            listeners.on_visibility.as_ref().as_ref().unchecked_ref(),
        );
    }
}

pub fn prefers_reduced_motion() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        use portfolio_core::glitch::REDUCED_MOTION_QUERY;
        web_sys::window()
            .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
            .map(|media| media.matches())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}
