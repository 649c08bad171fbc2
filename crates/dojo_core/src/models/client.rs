//! Client records.

use super::{null_as_empty, PhotoUpload, Resource, ResourceId};
use crate::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity document kinds accepted for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "DNI")]
    Dni,
    #[serde(rename = "RUC")]
    Ruc,
}

/// Selectable genders, in display order.
pub const GENDERS: &[&str] = &["Masculino", "Femenino", "Otro"];

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dni => "DNI",
            Self::Ruc => "RUC",
        }
    }

    /// Exact number of digits a document of this kind carries.
    pub fn digits(self) -> usize {
        match self {
            Self::Dni => 8,
            Self::Ruc => 11,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DNI" => Ok(Self::Dni),
            "RUC" => Ok(Self::Ruc),
            other => Err(CoreError::BadRequest(format!(
                "unknown document type '{}'",
                other
            ))),
        }
    }
}

/// Client as returned by `GET /clients`.
///
/// `cellphome` is the backend's field name and must not be corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ResourceId,
    pub name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document: String,
    pub address: String,
    pub cellphome: String,
    pub email: String,
    pub gender: String,
    pub birthday: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photo: String,
}

impl Resource for ClientRecord {
    const COLLECTION: &'static str = "clients";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Parse the date portion of a backend birthday (`YYYY-MM-DD`, optionally
/// followed by a time component).
pub fn parse_birthday(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

/// Whole years between `birthday` and `today`.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age
}

impl ClientRecord {
    /// Age in whole years as of `today`, or `None` when the birthday is unparseable.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        parse_birthday(&self.birthday)
            .ok()
            .map(|birthday| age_on(birthday, today))
    }
}

/// Payload for `POST /clients`. Always carries a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRequest {
    pub name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document: String,
    pub address: String,
    pub cellphome: String,
    pub email: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub photo: PhotoUpload,
}

impl ClientRequest {
    /// Birthday in the `YYYY-MM-DD` form the backend expects.
    pub fn birthday_wire(&self) -> String {
        self.birthday.format("%Y-%m-%d").to_string()
    }
}
