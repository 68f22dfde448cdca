//! HTTP handlers for the search page

pub mod page;
pub mod static_files;
