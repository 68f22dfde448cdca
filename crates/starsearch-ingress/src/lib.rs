//! StarSearch Ingress
//!
//! This crate provides the HTTP surface the browser view calls:
//! - `POST /api/search` relays a person search to the upstream directory
//! - `GET /api/popular` relays the popular people list
//! - Request-id middleware shared by every route

pub mod middleware;
pub mod people;
pub mod types;

pub use people::{ApiState, Endpoint, router};
pub use types::{IngressError, IngressResult, RequestId};
