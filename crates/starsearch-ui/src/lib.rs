//! StarSearch Web UI
//!
//! Server-rendered search page for the people API.
//! The page drives a `SearchView` that calls `/api/search` and `/api/popular`
//! over HTTP, exactly as a browser would, and renders the outcome.
//! Templates and the stylesheet are compiled into the binary.

pub mod client;
pub mod handlers;
pub mod server;
pub mod view;

pub use client::{ApiClient, ViewError};
pub use server::{UiConfig, UiState, ui_router};
pub use view::{Action, Phase, Rendering, SearchView, ViewSnapshot};
