//! # SnippetKit CLI
//!
//! Command-line client for the SnippetKit snippet-sharing service.
//!
//! This crate authenticates against the service, searches and previews
//! snippets, and installs them into the local project.

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod install;
pub mod utils;

pub use utils::error::{SnippetError, SnippetResult};
