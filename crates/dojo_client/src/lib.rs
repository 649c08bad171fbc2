//! Remote resource client for the dojo REST backend.
//!
//! List calls decode JSON arrays; any call carrying a photo is sent as
//! `multipart/form-data`; lifecycle toggles are `PATCH` calls whose intent is
//! carried by the path. Nothing is retried.

/// Create/update acknowledgment payloads.
pub mod ack;
/// HTTP client wiring and per-collection endpoints.
pub mod api;
/// API error taxonomy.
pub mod error;
/// Multipart field encoding for create/update/activate.
pub mod multipart;
/// Service traits consumed by the admin layer.
pub mod service;

pub use ack::{CreateAck, MessageAck};
pub use api::{ApiClient, ClientsApi, InstructorsApi, ResourceApi};
pub use error::ApiError;
pub use reqwest::StatusCode;
pub use service::{ClientService, InstructorService, ListSource};
