//! Command handlers for the msqadm CLI
//!
//! Each submodule owns one command family; handlers take the wired [`crate::app::App`]
//! and the parsed flags, call into the library, and render the outcome.

pub mod auth;
pub mod deposits;
pub mod list;
pub mod prefs;
pub mod version;
