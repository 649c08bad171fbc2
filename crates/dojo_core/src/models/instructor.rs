//! Instructor records.
//!
//! `status` and `is_published` are independent flags: an inactive instructor
//! may still be published and vice versa.

use super::{null_as_empty, PhotoUpload, Resource, ResourceId};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Belt levels offered by the instructor form, lowest first.
pub const BELT_LEVELS: &[&str] = &[
    "Blanca", "Amarilla", "Naranja", "Verde", "Azul", "Marrón", "Negra",
];

/// Lifecycle status. Values the console does not know are kept verbatim so a
/// record carrying one still decodes and displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstructorStatus {
    #[default]
    Active,
    Inactive,
    #[serde(untagged)]
    Other(String),
}

impl InstructorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Other(raw) => raw,
        }
    }

    /// Display label; unknown values label as themselves.
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        *self == Self::Active
    }
}

impl fmt::Display for InstructorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses operator input; only the two selectable statuses are accepted.
impl FromStr for InstructorStatus {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(CoreError::BadRequest(format!("unknown status '{}'", other))),
        }
    }
}

/// Instructor as returned by `GET /instructors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRecord {
    pub id: ResourceId,
    pub name: String,
    pub last_name: String,
    pub specialty: String,
    pub belt_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_twitter: Option<String>,
    pub status: InstructorStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photo: String,
    #[serde(default)]
    pub is_published: bool,
}

impl Resource for InstructorRecord {
    const COLLECTION: &'static str = "instructors";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Payload for instructor create, update and activate calls.
///
/// `photo` is `None` on update when the existing photo should be kept, and
/// always `None` on activate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstructorRequest {
    pub name: String,
    pub last_name: String,
    pub specialty: String,
    pub belt_level: String,
    pub bio: Option<String>,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    pub certifications: Option<String>,
    pub social_media_facebook: Option<String>,
    pub social_media_instagram: Option<String>,
    pub social_media_twitter: Option<String>,
    pub status: Option<InstructorStatus>,
    pub photo: Option<PhotoUpload>,
}

impl InstructorRequest {
    /// Re-submission of a stored record with the status forced to active.
    pub fn activation_of(record: &InstructorRecord) -> Self {
        Self {
            name: record.name.clone(),
            last_name: record.last_name.clone(),
            specialty: record.specialty.clone(),
            belt_level: record.belt_level.clone(),
            bio: record.bio.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            experience_years: record.experience_years,
            certifications: record.certifications.clone(),
            social_media_facebook: record.social_media_facebook.clone(),
            social_media_instagram: record.social_media_instagram.clone(),
            social_media_twitter: record.social_media_twitter.clone(),
            status: Some(InstructorStatus::Active),
            photo: None,
        }
    }
}
