use dioxus::prelude::*;
use portfolio_core::cycler::{Cycler, CyclerTiming};
use portfolio_core::reveal::{Reveal, RevealOptions};
use portfolio_core::ConfigError;

use crate::machines::{build, use_autostart, use_machine, MachineHandle};
use crate::sounds::use_notifier;
use crate::terminal::TerminalCursor;
use crate::timers::{entropy_seed, ms, sleep};

#[derive(Props, Clone, PartialEq)]
pub struct TypeWriterProps {
    #[props(into)]
    text: String,
    #[props(default = 50)]
    delay_ms: u64,
    #[props(default = true)]
    show_cursor: bool,
    #[props(default)]
    hide_cursor_on_complete: bool,
    #[props(default)]
    sound: bool,
    #[props(default)]
    jitter: f64,
    on_complete: Option<EventHandler<()>>,
    class: Option<String>,
}

/// Reveals `text` one character at a time. A different `text` remounts the
/// reveal from the start.
#[component]
pub fn TypeWriter(props: TypeWriterProps) -> Element {
    let text = props.text.clone();
    rsx! {
        TypeWriterRun { key: "{text}", config: props }
    }
}

#[component]
fn TypeWriterRun(config: TypeWriterProps) -> Element {
    let props = config;
    let seeded = props.clone();
    let reveal = use_machine(move || {
        let options = RevealOptions {
            jitter: seeded.jitter,
            show_cursor: seeded.show_cursor,
            hide_cursor_on_complete: seeded.hide_cursor_on_complete,
            sound: seeded.sound,
            seed: entropy_seed(),
            ..RevealOptions::default().with_delay_ms(seeded.delay_ms)
        };
        Reveal::new(seeded.text, options)
    });
    use_autostart(&reveal);

    let mut reported = use_signal(|| false);
    let on_complete = props.on_complete;
    let watched = reveal.clone();
    use_effect(move || {
        if watched.frame().complete && !*reported.peek() {
            reported.set(true);
            if let Some(handler) = on_complete {
                handler.call(());
            }
        }
    });

    let frame = reveal.frame();
    let class = props.class.unwrap_or_default();
    rsx! {
        span { class: "typewriter {class}",
            "{frame.text}"
            if frame.show_cursor {
                TerminalCursor {}
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RotatingTextProps {
    phrases: Vec<String>,
    #[props(default)]
    revealed: bool,
    #[props(default)]
    sound: bool,
    class: Option<String>,
}

/// Types, holds and deletes each phrase in turn.
#[component]
pub fn RotatingText(props: RotatingTextProps) -> Element {
    let notifier = use_notifier();
    let phrases = props.phrases.clone();
    let (revealed, sound) = (props.revealed, props.sound);
    let cycler: Result<MachineHandle<Cycler>, ConfigError> = use_hook(move || {
        let cycler = Cycler::new(phrases, CyclerTiming::default())?.with_sound(sound);
        let cycler = if revealed { cycler.revealed() } else { cycler };
        Ok(build(cycler, notifier))
    });

    let class = props.class.unwrap_or_default();
    match cycler {
        Ok(handle) => rsx! {
            RotatingTextRun { handle, class }
        },
        Err(err) => {
            tracing::warn!("rotating-text: {err}");
            rsx! {}
        }
    }
}

#[component]
fn RotatingTextRun(handle: MachineHandle<Cycler>, class: String) -> Element {
    use_autostart(&handle);
    let frame = handle.frame();
    rsx! {
        span { class: "rotating-text {class}",
            "{frame.text}"
            TerminalCursor {}
        }
    }
}

/// `$ <command>` typed out, then `on_ready` once the output may appear.
#[component]
pub fn CommandEcho(
    #[props(into)] command: String,
    #[props(default = 300)] settle_ms: u64,
    on_ready: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "command-echo-line",
            span { class: "text-terminal-green", "$ " }
            TypeWriter {
                text: command,
                show_cursor: false,
                on_complete: move |_| {
                    spawn(async move {
                        sleep(ms(settle_ms)).await;
                        on_ready.call(());
                    });
                },
            }
        }
    }
}
