pub mod app;
pub mod cache;
pub mod config;
pub mod cors;
pub mod github;
pub mod logger;
pub mod request_context;

pub use app::{build_router, build_router_with_source};
