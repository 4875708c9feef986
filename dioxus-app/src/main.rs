mod about;
mod boot_splash;
mod command_input;
mod config;
mod contact;
mod glitch;
mod home;
mod hooks;
mod machines;
mod presentation;
mod projects;
mod routes;
mod skills;
mod sounds;
mod terminal;
mod timers;
mod typewriter;

fn main() {
    dioxus::launch(routes::App);
}
