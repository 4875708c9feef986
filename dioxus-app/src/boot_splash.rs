use dioxus::prelude::*;
use portfolio_core::boot::{mark_splash_shown, should_show_splash, BootSplash, SessionFlag};

use crate::machines::{use_autostart, use_machine};

/// `sessionStorage` entry that survives reloads within one tab.
pub struct SessionStorageFlag;

impl SessionFlag for SessionStorageFlag {
    fn is_set(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo_storage::{SessionStorage, Storage};
            use portfolio_core::boot::SPLASH_SESSION_KEY;
            SessionStorage::get::<bool>(SPLASH_SESSION_KEY).unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            true
        }
    }

    fn set(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo_storage::{SessionStorage, Storage};
            use portfolio_core::boot::SPLASH_SESSION_KEY;
            if let Err(err) = SessionStorage::set(SPLASH_SESSION_KEY, true) {
                tracing::debug!("boot-splash: session flag not stored: {err}");
            }
        }
    }
}

/// Shows the splash over everything on the first visit of a session, then
/// hands over to `children`.
#[component]
pub fn BootSplashGate(children: Element) -> Element {
    let mut showing = use_signal(|| should_show_splash(&SessionStorageFlag));

    if showing() {
        return rsx! {
            BootSplashScreen {
                on_complete: move |_| {
                    mark_splash_shown(&SessionStorageFlag);
                    showing.set(false);
                },
            }
        };
    }
    rsx! {
        {children}
    }
}

#[component]
fn BootSplashScreen(on_complete: EventHandler<()>) -> Element {
    let splash = use_machine(BootSplash::standard);
    use_autostart(&splash);

    let mut reported = use_signal(|| false);
    let watched = splash.clone();
    use_effect(move || {
        if watched.frame().complete && !*reported.peek() {
            tracing::debug!("boot-splash: complete");
            reported.set(true);
            on_complete.call(());
        }
    });

    let frame = splash.frame();
    let lines = splash.runner().with(|machine| machine.visible_lines().to_vec());
    let last = lines.len().saturating_sub(1);
    let screen_class = if frame.glitching {
        "boot-splash boot-splash-glitching"
    } else {
        "boot-splash"
    };

    rsx! {
        div { class: "{screen_class}", role: "status", aria_live: "polite",
            div { class: "boot-splash-lines",
                for (index, line) in lines.into_iter().enumerate() {
                    p {
                        key: "{index}",
                        class: line_class(&line, index == last && !frame.complete),
                        span { class: "text-terminal-green", "> " }
                        "{line}"
                    }
                }
            }
            if frame.glitching {
                div { class: "boot-splash-noise", aria_hidden: "true" }
            }
        }
    }
}

fn line_class(line: &str, current: bool) -> String {
    let mut class = String::from("boot-splash-line");
    if line.starts_with("error") {
        class.push_str(" text-terminal-red");
    } else {
        class.push_str(" text-terminal-white");
    }
    if current {
        class.push_str(" boot-splash-jitter");
    }
    class
}
