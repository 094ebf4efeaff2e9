//! CLI command implementations

pub mod api;
pub mod download;
pub mod webhook;
