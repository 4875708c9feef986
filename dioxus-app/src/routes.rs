use dioxus::prelude::*;
use dioxus_router::{use_route, Link, Outlet, Routable, Router};
use portfolio_core::commands::Page;
use portfolio_core::content::{not_found, OWNER_NAME};

use crate::about::About;
use crate::boot_splash::BootSplashGate;
use crate::command_input::CommandInput;
use crate::config::use_runtime_config;
use crate::contact::Contact;
use crate::glitch::{AmbientGlitch, SignalGlitchOverlay};
use crate::home::Home;
use crate::presentation::use_presentation_provider;
use crate::projects::Projects;
use crate::skills::Skills;
use crate::terminal::{Navigation, TerminalCursor, TerminalHeader, TerminalPrompt, TerminalWindow};

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    use_presentation_provider();

    let config = match config_resource() {
        None => {
            return rsx! {
                document::Title { "{OWNER_NAME}" }
                div { class: "page loading",
                    h1 { "Loading config..." }
                }
            }
        }
        Some(Ok(config)) => config,
        Some(Err(message)) => {
            return rsx! {
                document::Title { "{OWNER_NAME}" }
                div { class: "page loading",
                    h1 { "Config load failed" }
                    p { "{message}" }
                }
            }
        }
    };

    use_context_provider(|| config);

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "theme-color", content: "#0bff96" }
        document::Meta { name: "description", content: "Portfolio of {OWNER_NAME}, served from a terminal." }
        BootSplashGate {
            Router::<Route> {}
        }
    }
}

#[derive(Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/skills")]
        Skills {},
        #[route("/projects")]
        Projects {},
        #[route("/contact")]
        Contact {},
        #[route("/:..route")]
        NotFound { route: Vec<String> },
}

pub fn page_route(page: Page) -> Route {
    match page {
        Page::Home => Route::Home {},
        Page::About => Route::About {},
        Page::Skills => Route::Skills {},
        Page::Projects => Route::Projects {},
        Page::Contact => Route::Contact {},
    }
}

/// Window chrome, navigation and the command line around every page.
#[component]
fn Shell() -> Element {
    let route = use_route::<Route>();
    let path = route.to_string();
    let active = Page::from_path(&path);
    let display_cwd = match path.as_str() {
        "/" => "~".to_string(),
        other => format!("~{other}"),
    };

    rsx! {
        div { class: "terminal-screen",
            TerminalWindow { aria_label: Some(format!("{OWNER_NAME} terminal")),
                TerminalHeader { display_cwd }
                Navigation { active }
                div { class: "terminal-body terminal-stack",
                    Outlet::<Route> {}
                }
                CommandInput { path }
            }
            AmbientGlitch {}
            SignalGlitchOverlay {}
        }
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    tracing::debug!("not-found: {path}");
    rsx! {
        document::Title { "Not Found | terminal" }
        section { class: "not-found terminal-stack",
            TerminalPrompt { command: Some(format!("cd {path}")), children: rsx! {} }
            p { class: "text-terminal-red", "{not_found::message(&path)}" }
            TerminalPrompt {
                children: rsx! { Link { to: Route::Home {}, class: "terminal-link text-terminal-yellow", "cd ~" } }
            }
            TerminalPrompt { children: rsx! { TerminalCursor {} } }
        }
    }
}
