use dioxus::prelude::*;
use portfolio_core::content::{projects, Project};
use portfolio_core::fetch::FetchView;
use portfolio_core::github::StarredRepo;

use crate::hooks::use_starred_repos;
use crate::typewriter::{CommandEcho, TypeWriter};

#[component]
pub fn Projects() -> Element {
    let mut ready = use_signal(|| false);
    let mut expanded = use_signal(|| None::<&'static str>);

    rsx! {
        document::Title { "Projects | terminal" }
        section { class: "projects terminal-stack",
            CommandEcho { command: projects::COMMAND, on_ready: move |_| ready.set(true) }
            if ready() {
                div { class: "terminal-indent terminal-stack",
                    p { class: "terminal-muted",
                        TypeWriter { text: projects::listing_header(), delay_ms: 30, show_cursor: false }
                    }
                    for project in projects::PROJECTS {
                        ProjectEntry {
                            key: "{project.id}",
                            project,
                            open: expanded() == Some(project.id),
                            on_toggle: move |id: &'static str| {
                                let next = if *expanded.peek() == Some(id) { None } else { Some(id) };
                                expanded.set(next);
                            },
                        }
                    }
                    p { class: "projects-footer terminal-muted",
                        TypeWriter { text: projects::FOOTER, delay_ms: 20, show_cursor: false }
                    }
                    StarredPanel {}
                }
            }
        }
    }
}

#[component]
fn ProjectEntry(project: Project, open: bool, on_toggle: EventHandler<&'static str>) -> Element {
    let marker = if open { "▾" } else { "▸" };
    rsx! {
        article { class: "project terminal-stack-sm",
            button {
                r#type: "button",
                class: "project-toggle",
                aria_expanded: "{open}",
                onclick: move |_| on_toggle.call(project.id),
                span { class: "text-terminal-green", "{marker} " }
                span { class: "text-terminal-yellow", "{project.name}/" }
                span { class: "terminal-muted", " [{project.tech.len()} tech]" }
            }
            p { class: "terminal-muted", "{project.description}" }
            if open {
                div { class: "project-details terminal-indent terminal-stack-sm",
                    p { class: "text-terminal-green", "Tech Stack:" }
                    div { class: "project-tech",
                        for tech in project.tech.iter() {
                            span { key: "{tech}", class: "terminal-chip", "{tech}" }
                        }
                    }
                    p { class: "text-terminal-green", "Build Log:" }
                    div { class: "project-build-log",
                        for (index, line) in project.build_log.iter().enumerate() {
                            p { key: "{index}", class: "terminal-muted",
                                TypeWriter { text: *line, delay_ms: 20, show_cursor: false }
                            }
                        }
                    }
                    div { class: "project-links",
                        a {
                            href: "{project.github}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            class: "terminal-link text-terminal-cyan",
                            "Source"
                        }
                        if let Some(live) = project.live {
                            a {
                                href: "{live}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                class: "terminal-link text-terminal-cyan",
                                "Live Demo"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StarredPanel() -> Element {
    let mut starred = use_starred_repos();
    let state = starred.state();
    let state = state.read();

    rsx! {
        div { class: "starred-panel terminal-stack-sm",
            p { class: "text-terminal-green", "{projects::STARRED_HEADING}" }
            match state.view() {
                FetchView::Loading => rsx! {
                    p { class: "terminal-muted", "[INFO] Fetching starred repositories..." }
                },
                FetchView::Failed(message) => rsx! {
                    div { class: "terminal-error", "[ERROR] {message}" }
                    button {
                        r#type: "button",
                        class: "terminal-link text-terminal-yellow",
                        onclick: move |_| starred.refetch(),
                        "retry"
                    }
                },
                FetchView::Ready(repos) if repos.is_empty() => rsx! {
                    p { class: "terminal-muted", "No starred repositories yet." }
                },
                FetchView::Ready(repos) => rsx! {
                    div { class: "starred-grid",
                        for repo in repos.iter() {
                            StarredCard { key: "{repo.id}", repo: repo.clone() }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StarredCard(repo: StarredRepo) -> Element {
    let updated = repo.updated_at.get(..10).unwrap_or(&repo.updated_at).to_string();
    rsx! {
        a {
            href: "{repo.html_url}",
            target: "_blank",
            rel: "noopener noreferrer",
            class: "starred-card terminal-link",
            div { class: "starred-card-header",
                img {
                    class: "starred-avatar",
                    src: "{repo.owner.avatar_url}",
                    alt: "{repo.owner.login}",
                    loading: "lazy",
                    width: "20",
                    height: "20",
                }
                span { class: "text-terminal-yellow", "{repo.full_name}" }
            }
            p { class: "terminal-muted", "{repo.description}" }
            div { class: "starred-meta terminal-muted",
                if let Some(language) = &repo.language {
                    span { class: "text-terminal-cyan", "{language} " }
                }
                span { "★ {repo.stargazers_count} " }
                span { "updated {updated}" }
            }
            if !repo.topics.is_empty() {
                div { class: "starred-topics",
                    for topic in repo.topics.iter() {
                        span { key: "{topic}", class: "terminal-chip", "{topic}" }
                    }
                }
            }
        }
    }
}
