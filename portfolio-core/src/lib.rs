pub mod boot;
pub mod commands;
pub mod content;
pub mod cycler;
pub mod error;
pub mod fetch;
pub mod github;
pub mod glitch;
pub mod notifier;
pub mod presentation;
pub mod reveal;
pub mod runner;
pub mod scheduler;

pub use error::{ConfigError, FetchError};
pub use notifier::{Cue, Notifier, Silent};
pub use runner::{Machine, Runner, Tick};
pub use scheduler::{Scheduler, TimerId, VirtualScheduler};
