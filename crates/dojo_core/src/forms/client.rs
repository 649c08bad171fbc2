//! Client create form.

use super::{Control, ResourceForm, Rule, Violation};
use crate::models::client::{parse_birthday, GENDERS};
use crate::models::{ClientRequest, DocumentType, PhotoUpload};
use crate::CoreError;
use std::fmt;
use std::str::FromStr;

/// Editable client fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    Name,
    LastName,
    DocumentType,
    Document,
    Address,
    Cellphome,
    Email,
    Gender,
    Birthday,
}

impl ClientField {
    pub const ALL: [ClientField; 9] = [
        Self::Name,
        Self::LastName,
        Self::DocumentType,
        Self::Document,
        Self::Address,
        Self::Cellphome,
        Self::Email,
        Self::Gender,
        Self::Birthday,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastName => "last_name",
            Self::DocumentType => "document_type",
            Self::Document => "document",
            Self::Address => "address",
            Self::Cellphome => "cellphome",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::Birthday => "birthday",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientField {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value.trim())
            .ok_or_else(|| CoreError::BadRequest(format!("unknown client field '{}'", value)))
    }
}

/// Rules for the document number under a given document type.
pub fn document_rules(document_type: DocumentType) -> Vec<Rule> {
    vec![Rule::Required, Rule::Digits(document_type.digits())]
}

/// Draft of a new client. The document rule follows the selected document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientForm {
    document_type: DocumentType,
    name: Control,
    last_name: Control,
    document: Control,
    address: Control,
    cellphome: Control,
    email: Control,
    gender: Control,
    birthday: Control,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientForm {
    pub fn new() -> Self {
        let document_type = DocumentType::default();
        Self {
            document_type,
            name: Control::new("", vec![Rule::Required]),
            last_name: Control::new("", vec![Rule::Required]),
            document: Control::new("", document_rules(document_type)),
            address: Control::new("", vec![Rule::Required]),
            cellphome: Control::new("", vec![Rule::Required, Rule::MobilePhone]),
            email: Control::new("", vec![Rule::Required, Rule::Email]),
            gender: Control::new("", vec![Rule::Required, Rule::OneOf(GENDERS)]),
            birthday: Control::new("", vec![Rule::Required, Rule::IsoDate]),
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Select a document type, swap the document rules and re-check the
    /// current document number against them.
    pub fn set_document_type(&mut self, document_type: DocumentType) {
        self.document_type = document_type;
        self.document.set_rules(document_rules(document_type));
        self.document.update_validity();
    }

    fn text_control_mut(&mut self, field: ClientField) -> Option<&mut Control> {
        match field {
            ClientField::Name => Some(&mut self.name),
            ClientField::LastName => Some(&mut self.last_name),
            ClientField::DocumentType => None,
            ClientField::Document => Some(&mut self.document),
            ClientField::Address => Some(&mut self.address),
            ClientField::Cellphome => Some(&mut self.cellphome),
            ClientField::Email => Some(&mut self.email),
            ClientField::Gender => Some(&mut self.gender),
            ClientField::Birthday => Some(&mut self.birthday),
        }
    }

    /// Text control backing `field`; `None` for the document type selector.
    pub fn control(&self, field: ClientField) -> Option<&Control> {
        match field {
            ClientField::Name => Some(&self.name),
            ClientField::LastName => Some(&self.last_name),
            ClientField::DocumentType => None,
            ClientField::Document => Some(&self.document),
            ClientField::Address => Some(&self.address),
            ClientField::Cellphome => Some(&self.cellphome),
            ClientField::Email => Some(&self.email),
            ClientField::Gender => Some(&self.gender),
            ClientField::Birthday => Some(&self.birthday),
        }
    }

    /// Set a field from operator input, validating it immediately.
    ///
    /// # Errors
    /// Returns [`CoreError::BadRequest`] for an unknown document type.
    pub fn set(&mut self, field: ClientField, value: &str) -> Result<(), CoreError> {
        match self.text_control_mut(field) {
            Some(control) => {
                control.set_value(value);
                control.mark_touched();
            }
            None => self.set_document_type(value.parse()?),
        }
        Ok(())
    }

    /// Build the create payload from a valid form.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDate`] when the birthday cannot be parsed.
    pub fn to_request(&self, photo: PhotoUpload) -> Result<ClientRequest, CoreError> {
        Ok(ClientRequest {
            name: self.name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            document_type: self.document_type,
            document: self.document.value().to_string(),
            address: self.address.value().to_string(),
            cellphome: self.cellphome.value().to_string(),
            email: self.email.value().to_string(),
            gender: self.gender.value().to_string(),
            birthday: parse_birthday(self.birthday.value())?,
            photo,
        })
    }
}

impl ResourceForm for ClientForm {
    type Field = ClientField;

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_valid(&self) -> bool {
        ClientField::ALL
            .into_iter()
            .filter_map(|field| self.control(field))
            .all(Control::is_valid)
    }

    fn mark_all_touched(&mut self) {
        for field in ClientField::ALL {
            if let Some(control) = self.text_control_mut(field) {
                control.mark_touched();
            }
        }
    }

    fn violations(&self) -> Vec<(ClientField, Violation)> {
        ClientField::ALL
            .into_iter()
            .filter_map(|field| self.control(field).map(|control| (field, control)))
            .flat_map(|(field, control)| {
                control
                    .errors()
                    .iter()
                    .cloned()
                    .map(move |violation| (field, violation))
            })
            .collect()
    }
}
