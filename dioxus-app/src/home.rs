use dioxus::prelude::*;
use dioxus_router::Link;
use portfolio_core::boot::{BootOptions, BootStage, StagedReveal};
use portfolio_core::content::{SuggestionTarget, HOME_PROMPT, OWNER_NAME, SUGGESTIONS, TAGLINES};

use crate::machines::{use_autostart, use_machine};
use crate::routes::page_route;
use crate::terminal::TerminalCursor;
use crate::typewriter::RotatingText;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

fn taglines() -> Vec<String> {
    TAGLINES.iter().map(|line| line.to_string()).collect()
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn is_skip_key(key: &str) -> bool {
    key == "Escape"
}

/// Runs `on_skip` for the skip key pressed anywhere on the page, whatever
/// element holds focus, until the calling component unmounts.
fn use_document_skip_key(on_skip: impl Fn() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let listener = use_hook(move || Rc::new(attach_skip_key(on_skip)));
        use_drop(move || {
            if let Some(listener) = &*listener {
                detach_skip_key(listener);
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = on_skip;
}

#[cfg(target_arch = "wasm32")]
fn attach_skip_key(
    on_skip: impl Fn() + 'static,
) -> Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>> {
    let document = web_sys::window()?.document()?;
    let listener = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if is_skip_key(&event.key()) {
            on_skip();
        }
    }) as Box<dyn FnMut(_)>);
    document
        .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
        .ok()?;
    Some(listener)
}

#[cfg(target_arch = "wasm32")]
fn detach_skip_key(listener: &Closure<dyn FnMut(web_sys::KeyboardEvent)>) {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        let _ = document
            .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
    }
}

#[component]
pub fn Home() -> Element {
    let boot = use_machine(|| StagedReveal::new(OWNER_NAME, HOME_PROMPT, BootOptions::default()));
    use_autostart(&boot);

    let frame = boot.frame();
    let delays: Vec<u128> = boot.runner().with(|machine| {
        (0..SUGGESTIONS.len())
            .map(|index| machine.command_delay(index).as_millis())
            .collect()
    });

    let skipper = boot.clone();
    let skip = move || {
        tracing::debug!("home: skip intro");
        skipper.runner().interrupt(|machine, _| machine.skip());
    };
    use_document_skip_key(skip.clone());

    rsx! {
        document::Title { "{OWNER_NAME} | terminal" }
        section { class: "home terminal-stack",
            div { class: "home-hero",
                h1 { class: "home-heading text-terminal-green",
                    "{frame.heading}"
                    if frame.stage == BootStage::Heading {
                        TerminalCursor {}
                    }
                }
                if frame.stage >= BootStage::Subtitle {
                    // A skip remounts the cycler with its first phrase typed out.
                    if frame.skipped {
                        p { class: "home-subtitle terminal-muted",
                            RotatingText { phrases: taglines(), revealed: true }
                        }
                    } else {
                        p { class: "home-subtitle terminal-muted",
                            RotatingText { phrases: taglines() }
                        }
                    }
                }
            }
            if frame.stage >= BootStage::Prompt {
                p { class: "home-prompt text-terminal-white", "{frame.prompt}" }
            }
            if frame.stage == BootStage::Commands {
                ul { class: "home-suggestions terminal-indent",
                    for (suggestion, delay) in SUGGESTIONS.iter().zip(delays) {
                        li {
                            key: "{suggestion.command}",
                            class: "home-suggestion",
                            style: "animation-delay: {delay}ms",
                            span { class: "text-terminal-green", "$ " }
                            match suggestion.target {
                                SuggestionTarget::Route(page) => rsx! {
                                    Link { to: page_route(page), class: "terminal-link",
                                        span { class: "text-terminal-yellow", "{suggestion.command}" }
                                        span { class: "terminal-muted", " // {suggestion.description}" }
                                    }
                                },
                                SuggestionTarget::Download(href) => rsx! {
                                    a { href: "{href}", download: "", class: "terminal-link",
                                        span { class: "text-terminal-yellow", "{suggestion.command}" }
                                        span { class: "terminal-muted", " // {suggestion.description}" }
                                    }
                                },
                                SuggestionTarget::Run => rsx! {
                                    span { class: "text-terminal-yellow", "{suggestion.command}" }
                                    span { class: "terminal-muted", " // {suggestion.description}" }
                                },
                            }
                        }
                    }
                }
            } else {
                button {
                    r#type: "button",
                    class: "terminal-link terminal-muted home-skip",
                    onclick: move |_| skip(),
                    "skip intro [esc]"
                }
            }
        }
    }
}
