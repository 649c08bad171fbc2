//! Resource records exchanged with the backend, plus upload payloads.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Client records and create requests.
pub mod client;
/// Instructor records, lifecycle flags and create/update requests.
pub mod instructor;
/// Binary photo payloads and preview data URLs.
pub mod photo;


pub use client::{ClientRecord, ClientRequest, DocumentType};
pub use instructor::{InstructorRecord, InstructorRequest, InstructorStatus};
pub use photo::PhotoUpload;

/// Decode a string field the backend may send as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Server-assigned record identity.
pub type ResourceId = i64;

/// A record type that lives in a REST collection.
///
/// Equality is structural: two fetches that decode to the same field values
/// compare equal regardless of allocation identity.
pub trait Resource:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection path segment below the API base (`clients`, `instructors`).
    const COLLECTION: &'static str;

    fn id(&self) -> ResourceId;

    /// `name last_name`, as shown in notices.
    fn full_name(&self) -> String;
}
