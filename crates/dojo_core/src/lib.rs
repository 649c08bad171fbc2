//! Core domain library for the dojo admin console (records, search, forms, config).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across crates.
pub mod constants;
/// Core error types.
pub mod error;
/// Reactive-style form controls and the per-resource form drafts.
pub mod forms;
/// Resource records and upload payloads.
pub mod models;
/// Search filter over an authoritative collection.
pub mod search;

pub use config::Config;
pub use constants::*;
pub use error::CoreError;
pub use models::{Resource, ResourceId};
