//! Configuration module for the streaming STT plugin.
//!
//! Hosts hand plugins a JSON-ish configuration block; this module parses
//! and validates it.

#[allow(clippy::module_inception)]
mod config;

pub use config::PluginConfig;
