//! Multipart encoding of resource payloads.
//!
//! Field names are the backend's exact keys. Optional text is omitted when
//! empty; numbers are sent as decimal text.

use crate::ApiError;
use dojo_core::models::{ClientRequest, InstructorRequest, PhotoUpload};
use reqwest::multipart::{Form, Part};

/// A single form-data field prior to encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text { name: &'static str, value: String },
    File { name: &'static str, photo: PhotoUpload },
}

impl FormField {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Text value, or `None` for a file field.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text { value, .. } => Some(value),
            Self::File { .. } => None,
        }
    }
}

fn push_optional(fields: &mut Vec<FormField>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        fields.push(FormField::text(name, value));
    }
}

/// Fields of `POST /clients`. Every field is always present.
pub fn client_fields(request: &ClientRequest) -> Vec<FormField> {
    vec![
        FormField::File {
            name: "photo",
            photo: request.photo.clone(),
        },
        FormField::text("name", request.name.as_str()),
        FormField::text("last_name", request.last_name.as_str()),
        FormField::text("document_type", request.document_type.as_str()),
        FormField::text("document", request.document.as_str()),
        FormField::text("address", request.address.as_str()),
        FormField::text("cellphome", request.cellphome.as_str()),
        FormField::text("email", request.email.as_str()),
        FormField::text("gender", request.gender.as_str()),
        FormField::text("birthday", request.birthday_wire()),
    ]
}

/// Fields of instructor create, update and activate calls.
///
/// The photo part is present only when the request carries one.
pub fn instructor_fields(request: &InstructorRequest) -> Vec<FormField> {
    let mut fields = Vec::with_capacity(14);
    if let Some(photo) = request.photo.as_ref() {
        fields.push(FormField::File {
            name: "photo",
            photo: photo.clone(),
        });
    }
    fields.push(FormField::text("name", request.name.as_str()));
    fields.push(FormField::text("last_name", request.last_name.as_str()));
    fields.push(FormField::text("specialty", request.specialty.as_str()));
    fields.push(FormField::text("belt_level", request.belt_level.as_str()));
    push_optional(&mut fields, "bio", request.bio.as_deref());
    fields.push(FormField::text("email", request.email.as_str()));
    fields.push(FormField::text("phone", request.phone.as_str()));
    fields.push(FormField::text(
        "experience_years",
        request.experience_years.to_string(),
    ));
    push_optional(
        &mut fields,
        "certifications",
        request.certifications.as_deref(),
    );
    push_optional(
        &mut fields,
        "social_media_facebook",
        request.social_media_facebook.as_deref(),
    );
    push_optional(
        &mut fields,
        "social_media_instagram",
        request.social_media_instagram.as_deref(),
    );
    push_optional(
        &mut fields,
        "social_media_twitter",
        request.social_media_twitter.as_deref(),
    );
    if let Some(status) = &request.status {
        fields.push(FormField::text("status", status.as_str()));
    }
    fields
}

/// Encode fields into a `reqwest` multipart form, preserving order.
///
/// # Errors
/// Returns [`ApiError::Transport`] when a photo carries an unparseable MIME type.
pub fn into_form(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, photo } => {
                let part = Part::bytes(photo.bytes)
                    .file_name(photo.file_name)
                    .mime_str(&photo.content_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
