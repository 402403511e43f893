//! Shared library for `MallaTracker`
//! Contains the grade projection engine, curriculum catalog, persistence,
//! configuration, and logging used by the CLI.

pub mod config;
pub mod core;
pub mod logger;
