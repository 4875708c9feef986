use dioxus::prelude::*;
use dioxus_router::Link;
use portfolio_core::commands::Page;
use portfolio_core::content::{PROMPT_USER, TERMINAL_VERSION};
use portfolio_core::presentation::{CursorStyle, Theme};
use portfolio_core::{Cue, Notifier};

use crate::presentation::use_presentation;
use crate::routes::page_route;
use crate::sounds::use_sound_board;

#[component]
pub fn TerminalWindow(children: Element, aria_label: Option<String>) -> Element {
    let presentation = use_presentation();
    let label = aria_label.unwrap_or_else(|| "Terminal interface".to_string());
    let class = if presentation.read().scanlines_enabled {
        "terminal-window scanlines"
    } else {
        "terminal-window"
    };
    rsx! {
        div { class: "{class}", role: "main", aria_label: "{label}",
            {children}
        }
    }
}

#[component]
pub fn TerminalHeader(display_cwd: String) -> Element {
    let mut presentation = use_presentation();
    let sounds = use_sound_board();
    let current = presentation();
    let sound_label = if current.sound_enabled { "sound: on" } else { "sound: off" };
    let scanline_label = if current.scanlines_enabled { "crt: on" } else { "crt: off" };
    let cursor_label = match current.cursor_style {
        CursorStyle::Block => "cursor: █",
        CursorStyle::Underscore => "cursor: _",
    };

    let click_sounds = sounds.clone();
    let click = move || click_sounds.notifier().notify(Cue::Click);

    rsx! {
        div { class: "terminal-header",
            span { class: "text-terminal-red", "●" }
            span { class: "text-terminal-yellow", "●" }
            span { class: "text-terminal-green", "●" }
            span { class: "terminal-header-label text-terminal-cyan", "{TERMINAL_VERSION} {display_cwd}" }
            div { class: "terminal-header-controls",
                for theme in Theme::ALL {
                    button {
                        key: "{theme.as_str()}",
                        r#type: "button",
                        class: if current.theme == theme { "terminal-chip terminal-chip-active" } else { "terminal-chip" },
                        aria_pressed: "{current.theme == theme}",
                        title: "{theme.label()}",
                        onclick: {
                            let click = click.clone();
                            move |_| {
                                presentation.write().set_theme(theme);
                                click();
                            }
                        },
                        "{theme.as_str()}"
                    }
                }
                button {
                    r#type: "button",
                    class: "terminal-chip",
                    onclick: {
                        let click = click.clone();
                        move |_| {
                            let next = match presentation.peek().cursor_style {
                                CursorStyle::Block => CursorStyle::Underscore,
                                CursorStyle::Underscore => CursorStyle::Block,
                            };
                            presentation.write().set_cursor_style(next);
                            click();
                        }
                    },
                    "{cursor_label}"
                }
                button {
                    r#type: "button",
                    class: "terminal-chip",
                    onclick: {
                        let click = click.clone();
                        move |_| {
                            presentation.write().toggle_scanlines();
                            click();
                        }
                    },
                    "{scanline_label}"
                }
                button {
                    r#type: "button",
                    class: "terminal-chip",
                    aria_pressed: "{current.sound_enabled}",
                    onclick: move |_| {
                        presentation.write().toggle_sound();
                        sounds.0.resume();
                        click();
                    },
                    "{sound_label}"
                }
            }
        }
    }
}

fn nav_command(page: Page) -> &'static str {
    match page {
        Page::Home => "cd ~",
        Page::About => "cat about.txt",
        Page::Skills => "list --skills",
        Page::Projects => "show projects",
        Page::Contact => "contact --info",
    }
}

#[component]
pub fn Navigation(active: Option<Page>) -> Element {
    rsx! {
        nav { class: "terminal-nav", aria_label: "Primary",
            for page in Page::ALL {
                Link {
                    key: "{page.label()}",
                    to: page_route(page),
                    class: if active == Some(page) { "terminal-link terminal-nav-active text-terminal-yellow" } else { "terminal-link text-terminal-cyan" },
                    if active == Some(page) {
                        span { class: "text-terminal-green", "> " }
                    }
                    "{nav_command(page)}"
                }
            }
        }
    }
}

#[component]
pub fn TerminalPrompt(path: Option<String>, command: Option<String>, children: Element) -> Element {
    let path = path.unwrap_or_else(|| "~".to_string());
    rsx! {
        div { class: "terminal-prompt",
            span { class: "text-terminal-green", "{PROMPT_USER}@terminal" }
            span { class: "text-terminal-white", ":" }
            span { class: "text-terminal-cyan", "{path}" }
            span { class: "text-terminal-white", "$ " }
            if let Some(command) = command {
                span { class: "text-terminal-yellow", "{command}" }
            }
            {children}
        }
    }
}

#[component]
pub fn TerminalCursor() -> Element {
    let presentation = use_presentation();
    let style = presentation.read().cursor_style;
    let glyph = match style {
        CursorStyle::Block => "█",
        CursorStyle::Underscore => "_",
    };
    rsx! {
        span { class: "terminal-cursor {style.class()} text-terminal-white", aria_hidden: "true", "{glyph}" }
    }
}
