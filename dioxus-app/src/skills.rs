use dioxus::prelude::*;
use portfolio_core::content::skills;
use portfolio_core::fetch::{bar_segments, FetchView, DEFAULT_BAR_WIDTH};

use crate::hooks::use_language_stats;
use crate::typewriter::{CommandEcho, TypeWriter};

#[component]
pub fn Skills() -> Element {
    let mut ready = use_signal(|| false);

    rsx! {
        document::Title { "Skills | terminal" }
        section { class: "skills terminal-stack",
            CommandEcho { command: skills::COMMAND, on_ready: move |_| ready.set(true) }
            if ready() {
                div { class: "terminal-indent terminal-stack",
                    p { class: "terminal-muted",
                        TypeWriter { text: skills::LOADING, delay_ms: 30, show_cursor: false }
                    }
                    p { class: "text-terminal-green",
                        TypeWriter { text: skills::LOADED, delay_ms: 30, show_cursor: false }
                    }
                    for category in skills::CATEGORIES {
                        div { key: "{category.name}", class: "skill-category terminal-stack-sm",
                            p { class: "skill-category-name text-terminal-green",
                                "[{category.name.to_uppercase()}]"
                            }
                            for skill in category.skills {
                                SkillBar { key: "{skill.name}", label: skill.name, level: skill.level }
                            }
                        }
                    }
                    div { class: "skills-summary terminal-stack-sm",
                        p { class: "terminal-muted",
                            TypeWriter { text: skills::SUMMARY, delay_ms: 20, show_cursor: false }
                        }
                        p { class: "text-terminal-green", "Total skills loaded: {skills::total_skills()}" }
                    }
                    LanguagePanel {}
                }
            }
        }
    }
}

#[component]
fn LanguagePanel() -> Element {
    let mut stats = use_language_stats();
    let state = stats.state();
    let state = state.read();

    rsx! {
        div { class: "language-panel terminal-stack-sm",
            p { class: "text-terminal-green", "{skills::LANGUAGES_HEADING}" }
            match state.view() {
                FetchView::Loading => rsx! {
                    p { class: "terminal-muted", "[INFO] Fetching language statistics..." }
                },
                FetchView::Failed(message) => rsx! {
                    div { class: "terminal-error", "[ERROR] {message}" }
                    button {
                        r#type: "button",
                        class: "terminal-link text-terminal-yellow",
                        onclick: move |_| stats.refetch(),
                        "retry"
                    }
                },
                FetchView::Ready(languages) if languages.is_empty() => rsx! {
                    p { class: "terminal-muted", "No language data available." }
                },
                FetchView::Ready(languages) => rsx! {
                    for language in languages.iter() {
                        SkillBar { key: "{language.name}", label: language.name.clone(), level: language.level }
                    }
                },
            }
        }
    }
}

/// `label [═════─────] 50%`
#[component]
pub fn SkillBar(#[props(into)] label: String, level: u32) -> Element {
    let (filled, empty) = bar_segments(level, DEFAULT_BAR_WIDTH);
    let filled = "═".repeat(filled);
    let empty = "─".repeat(empty);
    let shown = level.min(100);
    rsx! {
        div { class: "skill-bar",
            span { class: "skill-bar-label terminal-muted", "{label}" }
            span { class: "text-terminal-green", "[" }
            span { class: "skill-bar-filled text-terminal-green", "{filled}" }
            span { class: "skill-bar-empty terminal-muted", "{empty}" }
            span { class: "text-terminal-green", "]" }
            span { class: "skill-bar-value text-terminal-green", "{shown}%" }
        }
    }
}
