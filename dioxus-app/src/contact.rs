use dioxus::prelude::*;
use portfolio_core::commands::RESUME_PATH;
use portfolio_core::content::contact;

use crate::about::LinkList;
use crate::timers::{ms, sleep};
use crate::typewriter::CommandEcho;

#[derive(Clone, Debug, Default, PartialEq)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
}

impl ContactForm {
    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }
}

const SIMULATED_SEND_MS: u64 = 1_500;

#[component]
pub fn Contact() -> Element {
    let mut ready = use_signal(|| false);
    let mut form = use_signal(ContactForm::default);
    let sending = use_signal(|| false);
    let sent = use_signal(|| false);

    let submit_disabled = sending() || !form().is_complete();

    rsx! {
        document::Title { "Contact | terminal" }
        section { class: "contact terminal-stack",
            CommandEcho { command: contact::COMMAND, on_ready: move |_| ready.set(true) }
            if ready() {
                div { class: "terminal-indent terminal-stack",
                    LinkList { heading: contact::INFO_HEADING }
                    a { href: RESUME_PATH, download: "", class: "terminal-button", "Download Resume" }
                    p { class: "text-terminal-green", "{contact::MESSAGE_HEADING}" }
                    if sent() {
                        p { class: "text-terminal-green", "{contact::SENT_NOTICE}" }
                    }
                    form {
                        class: "terminal-form terminal-stack",
                        onsubmit: move |event| {
                            event.prevent_default();
                            if submit_disabled {
                                return;
                            }
                            let mut sending = sending;
                            let mut sent = sent;
                            spawn(async move {
                                sending.set(true);
                                sent.set(false);
                                sleep(ms(SIMULATED_SEND_MS)).await;
                                form.set(ContactForm::default());
                                sending.set(false);
                                sent.set(true);
                            });
                        },
                        div { class: "terminal-stack-sm",
                            label { r#for: "name", class: "terminal-muted",
                                span { class: "text-terminal-green", "$ " }
                                "name:"
                            }
                            input {
                                id: "name",
                                r#type: "text",
                                required: true,
                                value: "{form().name}",
                                placeholder: "Your name",
                                disabled: sending(),
                                class: "terminal-input-field",
                                oninput: move |event| {
                                    let mut next = form();
                                    next.name = event.value();
                                    form.set(next);
                                },
                            }
                        }
                        div { class: "terminal-stack-sm",
                            label { r#for: "email", class: "terminal-muted",
                                span { class: "text-terminal-green", "$ " }
                                "email:"
                            }
                            input {
                                id: "email",
                                r#type: "email",
                                required: true,
                                value: "{form().email}",
                                placeholder: "your@email.com",
                                disabled: sending(),
                                class: "terminal-input-field",
                                oninput: move |event| {
                                    let mut next = form();
                                    next.email = event.value();
                                    form.set(next);
                                },
                            }
                        }
                        div { class: "terminal-stack-sm",
                            label { r#for: "message", class: "terminal-muted",
                                span { class: "text-terminal-green", "$ " }
                                "message:"
                            }
                            textarea {
                                id: "message",
                                required: true,
                                value: "{form().message}",
                                rows: "6",
                                placeholder: "Your message...",
                                disabled: sending(),
                                class: "terminal-input-field terminal-textarea",
                                oninput: move |event| {
                                    let mut next = form();
                                    next.message = event.value();
                                    form.set(next);
                                },
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "terminal-button",
                            disabled: submit_disabled,
                            if sending() {
                                "Sending..."
                            } else {
                                "Send Message"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_needs_every_field() {
        let mut form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "   ".into(),
        };
        assert!(!form.is_complete());
        form.message = "hello".into();
        assert!(form.is_complete());
    }
}
