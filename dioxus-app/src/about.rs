use dioxus::prelude::*;
use portfolio_core::content::{about, LINKS};

use crate::typewriter::TypeWriter;

#[component]
pub fn About() -> Element {
    rsx! {
        document::Title { "About | terminal" }
        section { class: "about terminal-stack",
            div { class: "command-echo-line",
                span { class: "text-terminal-green", "$ " }
                TypeWriter { text: about::COMMAND, show_cursor: false }
            }
            div { class: "terminal-indent terminal-stack",
                div { class: "about-body",
                    p { class: "text-terminal-white",
                        TypeWriter { text: about::SUMMARY, delay_ms: 30, show_cursor: false }
                    }
                    for paragraph in about::PARAGRAPHS {
                        p { class: "terminal-muted", "{paragraph}" }
                    }
                }
                LinkList { heading: "[LINKS]" }
                div { class: "about-file-stats terminal-muted",
                    for (label, value) in about::FILE_STATS {
                        span { key: "{label}",
                            span { class: "text-terminal-green", "{label}: " }
                            "{value} "
                        }
                    }
                }
            }
        }
    }
}

/// The profile links, each opening in a new tab.
#[component]
pub fn LinkList(#[props(into)] heading: String) -> Element {
    rsx! {
        div { class: "link-list terminal-stack-sm",
            p { class: "terminal-muted", "{heading}" }
            for link in LINKS {
                a {
                    key: "{link.label}",
                    href: "{link.url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    class: "terminal-link",
                    span { class: "text-terminal-green", "{link.label}: " }
                    span { class: "text-terminal-white", "{link.handle}" }
                }
            }
        }
    }
}
