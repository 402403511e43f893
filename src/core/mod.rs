//! Core module for the grade projection engine and its collaborators

pub mod catalog;
pub mod models;
pub mod projection;
pub mod store;

/// Returns the current version of the `MallaTracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
