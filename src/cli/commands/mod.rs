//! Command handlers for the `MallaTracker` CLI

pub mod config;
pub mod courses;
pub mod grades;
