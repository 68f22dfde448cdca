//! StarSearch server
//!
//! Wires the TMDB connector, the people API, health and metrics endpoints and the
//! search page into one axum application.

pub mod app;
pub mod config;

pub use app::build_app;
pub use config::{ConfigError, ServerConfig};
