//! StarSearch Core Types and Traits
//!
//! This crate provides the fundamental types shared by every StarSearch crate:
//! - Person listing types received from the upstream directory
//! - The `{ error }` envelope returned to the browser on failure
//! - The `PeopleDirectory` trait the request handlers call through
//! - Text and structured formatting of people listings

pub mod directory;
pub mod envelope;
pub mod error;
pub mod format;
pub mod person;

pub use directory::{PeopleDirectory, UpstreamResponse};
pub use envelope::{ErrorEnvelope, SearchRequest};
pub use error::{Error, Result};
pub use person::{KnownFor, MediaType, PeoplePage, Person};
