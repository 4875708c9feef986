use dioxus::prelude::*;
use dioxus_router::use_navigator;
use portfolio_core::commands::{Effect, EntryKind, Interpreter};
use portfolio_core::content::{prompt_prefix, INPUT_PLACEHOLDER};
use portfolio_core::{Cue, Notifier};

use crate::routes::page_route;
use crate::sounds::use_notifier;

/// Prompt line plus the transcript of everything typed into it. The shell
/// keeps one interpreter for the whole visit, so history survives navigation.
#[component]
pub fn CommandInput(path: String) -> Element {
    let notifier = use_notifier();
    let navigator = use_navigator();
    let mut interpreter = use_signal(Interpreter::new);
    let mut draft = use_signal(String::new);

    let keypress = notifier.clone();
    let prefix = prompt_prefix(&path);
    let entries = interpreter.read().transcript().entries().to_vec();

    rsx! {
        div { class: "command-terminal",
            div { class: "command-transcript", aria_live: "polite",
                for (index, entry) in entries.into_iter().enumerate() {
                    p {
                        key: "{index}",
                        class: match entry.kind {
                            EntryKind::Echo => "command-echo text-terminal-white",
                            EntryKind::Output => "command-output text-terminal-green",
                        },
                        "{entry.text}"
                    }
                }
            }
            form {
                class: "command-line",
                onsubmit: move |event| {
                    event.prevent_default();
                    let raw = draft();
                    let effect = interpreter.write().submit(&raw, notifier.as_ref());
                    draft.set(String::new());
                    match effect {
                        Effect::None => {}
                        Effect::Navigate(page) => {
                            navigator.push(page_route(page));
                        }
                        Effect::OpenExternal(url) => open_in_new_tab(&url),
                    }
                },
                label { r#for: "command-input", class: "text-terminal-green command-prefix", "{prefix}$" }
                input {
                    id: "command-input",
                    r#type: "text",
                    class: "terminal-input-field command-input",
                    value: "{draft}",
                    placeholder: INPUT_PLACEHOLDER,
                    autocomplete: "off",
                    spellcheck: "false",
                    aria_label: "Terminal command",
                    oninput: move |event| {
                        draft.set(event.value());
                        keypress.notify(Cue::Keypress);
                    },
                }
            }
        }
    }
}

pub fn open_in_new_tab(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.open_with_url_and_target(url, "_blank").is_err() {
                tracing::warn!("terminal: could not open {url}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("terminal: open {url}");
}
