//! Instructor create/edit form.

use super::{non_empty, Control, ResourceForm, Rule, Violation};
use crate::models::instructor::BELT_LEVELS;
use crate::models::{InstructorRecord, InstructorRequest, InstructorStatus, PhotoUpload};
use crate::CoreError;
use std::fmt;
use std::str::FromStr;

const STATUS_VALUES: &[&str] = &["active", "inactive"];

/// Upper bound on years of experience; keeps the value inside the wire type.
pub const MAX_EXPERIENCE_YEARS: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructorField {
    Name,
    LastName,
    Specialty,
    BeltLevel,
    Bio,
    Email,
    Phone,
    ExperienceYears,
    Certifications,
    SocialMediaFacebook,
    SocialMediaInstagram,
    SocialMediaTwitter,
    Status,
}

impl InstructorField {
    pub const ALL: [InstructorField; 13] = [
        Self::Name,
        Self::LastName,
        Self::Specialty,
        Self::BeltLevel,
        Self::Bio,
        Self::Email,
        Self::Phone,
        Self::ExperienceYears,
        Self::Certifications,
        Self::SocialMediaFacebook,
        Self::SocialMediaInstagram,
        Self::SocialMediaTwitter,
        Self::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastName => "last_name",
            Self::Specialty => "specialty",
            Self::BeltLevel => "belt_level",
            Self::Bio => "bio",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ExperienceYears => "experience_years",
            Self::Certifications => "certifications",
            Self::SocialMediaFacebook => "social_media_facebook",
            Self::SocialMediaInstagram => "social_media_instagram",
            Self::SocialMediaTwitter => "social_media_twitter",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for InstructorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructorField {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value.trim())
            .ok_or_else(|| {
                CoreError::BadRequest(format!("unknown instructor field '{}'", value))
            })
    }
}

/// Draft of an instructor being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorForm {
    name: Control,
    last_name: Control,
    specialty: Control,
    belt_level: Control,
    bio: Control,
    email: Control,
    phone: Control,
    experience_years: Control,
    certifications: Control,
    social_media_facebook: Control,
    social_media_instagram: Control,
    social_media_twitter: Control,
    status: Control,
}

impl Default for InstructorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructorForm {
    /// Fresh form; experience starts at `0` and status at `active`.
    pub fn new() -> Self {
        Self {
            name: Control::new("", vec![Rule::Required]),
            last_name: Control::new("", vec![Rule::Required]),
            specialty: Control::new("", vec![Rule::Required]),
            belt_level: Control::new("", vec![Rule::Required, Rule::OneOf(BELT_LEVELS)]),
            bio: Control::optional(),
            email: Control::new("", vec![Rule::Required, Rule::Email]),
            phone: Control::new("", vec![Rule::Required, Rule::MobilePhone]),
            experience_years: Control::new(
                "0",
                vec![Rule::Required, Rule::IntegerBetween(0, MAX_EXPERIENCE_YEARS)],
            ),
            certifications: Control::optional(),
            social_media_facebook: Control::optional(),
            social_media_instagram: Control::optional(),
            social_media_twitter: Control::optional(),
            status: Control::new(
                InstructorStatus::Active.as_str(),
                vec![Rule::Required, Rule::OneOf(STATUS_VALUES)],
            ),
        }
    }

    fn control_mut(&mut self, field: InstructorField) -> &mut Control {
        match field {
            InstructorField::Name => &mut self.name,
            InstructorField::LastName => &mut self.last_name,
            InstructorField::Specialty => &mut self.specialty,
            InstructorField::BeltLevel => &mut self.belt_level,
            InstructorField::Bio => &mut self.bio,
            InstructorField::Email => &mut self.email,
            InstructorField::Phone => &mut self.phone,
            InstructorField::ExperienceYears => &mut self.experience_years,
            InstructorField::Certifications => &mut self.certifications,
            InstructorField::SocialMediaFacebook => &mut self.social_media_facebook,
            InstructorField::SocialMediaInstagram => &mut self.social_media_instagram,
            InstructorField::SocialMediaTwitter => &mut self.social_media_twitter,
            InstructorField::Status => &mut self.status,
        }
    }

    pub fn control(&self, field: InstructorField) -> &Control {
        match field {
            InstructorField::Name => &self.name,
            InstructorField::LastName => &self.last_name,
            InstructorField::Specialty => &self.specialty,
            InstructorField::BeltLevel => &self.belt_level,
            InstructorField::Bio => &self.bio,
            InstructorField::Email => &self.email,
            InstructorField::Phone => &self.phone,
            InstructorField::ExperienceYears => &self.experience_years,
            InstructorField::Certifications => &self.certifications,
            InstructorField::SocialMediaFacebook => &self.social_media_facebook,
            InstructorField::SocialMediaInstagram => &self.social_media_instagram,
            InstructorField::SocialMediaTwitter => &self.social_media_twitter,
            InstructorField::Status => &self.status,
        }
    }

    pub fn value(&self, field: InstructorField) -> &str {
        self.control(field).value()
    }

    /// Set a field from operator input, validating it immediately.
    pub fn set(&mut self, field: InstructorField, value: &str) {
        let control = self.control_mut(field);
        control.set_value(value);
        control.mark_touched();
    }

    /// Load every field from a stored record. Missing optional text becomes `""`.
    pub fn patch_from(&mut self, record: &InstructorRecord) {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        self.name.set_value(record.name.as_str());
        self.last_name.set_value(record.last_name.as_str());
        self.specialty.set_value(record.specialty.as_str());
        self.belt_level.set_value(record.belt_level.as_str());
        self.bio.set_value(optional(&record.bio));
        self.email.set_value(record.email.as_str());
        self.phone.set_value(record.phone.as_str());
        self.experience_years
            .set_value(record.experience_years.to_string());
        self.certifications.set_value(optional(&record.certifications));
        self.social_media_facebook
            .set_value(optional(&record.social_media_facebook));
        self.social_media_instagram
            .set_value(optional(&record.social_media_instagram));
        self.social_media_twitter
            .set_value(optional(&record.social_media_twitter));
        self.status.set_value(record.status.as_str());
    }

    /// Build the create/update payload from a valid form.
    ///
    /// `photo` is `None` when the operator kept the existing photo.
    ///
    /// # Errors
    /// Returns [`CoreError::BadRequest`] when experience or status do not parse.
    pub fn to_request(&self, photo: Option<PhotoUpload>) -> Result<InstructorRequest, CoreError> {
        let experience_years = self
            .experience_years
            .value()
            .trim()
            .parse::<u32>()
            .map_err(|_| {
                CoreError::BadRequest(format!(
                    "invalid experience_years '{}'",
                    self.experience_years.value()
                ))
            })?;
        let status = match non_empty(self.status.value()) {
            Some(raw) => Some(raw.parse::<InstructorStatus>()?),
            None => None,
        };
        Ok(InstructorRequest {
            name: self.name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            specialty: self.specialty.value().to_string(),
            belt_level: self.belt_level.value().to_string(),
            bio: non_empty(self.bio.value()),
            email: self.email.value().to_string(),
            phone: self.phone.value().to_string(),
            experience_years,
            certifications: non_empty(self.certifications.value()),
            social_media_facebook: non_empty(self.social_media_facebook.value()),
            social_media_instagram: non_empty(self.social_media_instagram.value()),
            social_media_twitter: non_empty(self.social_media_twitter.value()),
            status,
            photo,
        })
    }
}

impl ResourceForm for InstructorForm {
    type Field = InstructorField;

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_valid(&self) -> bool {
        InstructorField::ALL
            .into_iter()
            .all(|field| self.control(field).is_valid())
    }

    fn mark_all_touched(&mut self) {
        for field in InstructorField::ALL {
            self.control_mut(field).mark_touched();
        }
    }

    fn violations(&self) -> Vec<(InstructorField, Violation)> {
        InstructorField::ALL
            .into_iter()
            .flat_map(|field| {
                self.control(field)
                    .errors()
                    .iter()
                    .cloned()
                    .map(move |violation| (field, violation))
            })
            .collect()
    }
}
