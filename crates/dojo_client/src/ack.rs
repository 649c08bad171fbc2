//! Acknowledgment bodies returned by mutating calls.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /{resource}`.
///
/// The backend spells the key `Succes`; it is kept verbatim for wire
/// compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAck {
    #[serde(rename = "Succes", default)]
    pub succes: Option<String>,
}

/// Body of a successful `PUT` or `PATCH`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAck {
    #[serde(default)]
    pub message: Option<String>,
}
