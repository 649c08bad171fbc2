//! Free-text search over an authoritative collection.
//!
//! The filtered view is always recomputed from the full collection; it is
//! never patched in place.

use crate::models::{ClientRecord, InstructorRecord};

/// How a field is compared against the (already lower-cased) search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCase {
    /// The field is lower-cased before the substring test.
    Insensitive,
    /// The field is compared as stored; used for numeric identifiers.
    Sensitive,
}

/// One searchable field of a record type.
pub struct SearchField<T> {
    pub name: &'static str,
    pub value: fn(&T) -> &str,
    pub case: FieldCase,
}

/// Record types that can be filtered by a free-text term.
pub trait Searchable: Sized + 'static {
    /// Fields tested in order; a record matches when any field matches.
    const SEARCH_FIELDS: &'static [SearchField<Self>];
}

fn client_name(c: &ClientRecord) -> &str {
    &c.name
}

fn client_last_name(c: &ClientRecord) -> &str {
    &c.last_name
}

fn client_email(c: &ClientRecord) -> &str {
    &c.email
}

fn client_document(c: &ClientRecord) -> &str {
    &c.document
}

fn instructor_name(i: &InstructorRecord) -> &str {
    &i.name
}

fn instructor_last_name(i: &InstructorRecord) -> &str {
    &i.last_name
}

fn instructor_email(i: &InstructorRecord) -> &str {
    &i.email
}

fn instructor_specialty(i: &InstructorRecord) -> &str {
    &i.specialty
}

impl Searchable for ClientRecord {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "name",
            value: client_name,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "last_name",
            value: client_last_name,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "email",
            value: client_email,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "document",
            value: client_document,
            case: FieldCase::Sensitive,
        },
    ];
}

impl Searchable for InstructorRecord {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "name",
            value: instructor_name,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "last_name",
            value: instructor_last_name,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "email",
            value: instructor_email,
            case: FieldCase::Insensitive,
        },
        SearchField {
            name: "specialty",
            value: instructor_specialty,
            case: FieldCase::Insensitive,
        },
    ];
}

fn field_matches<T>(field: &SearchField<T>, record: &T, needle: &str) -> bool {
    let value = (field.value)(record);
    match field.case {
        FieldCase::Insensitive => value.to_lowercase().contains(needle),
        FieldCase::Sensitive => value.contains(needle),
    }
}

/// Whether `record` matches an already lower-cased, non-empty needle.
pub fn matches<T: Searchable>(record: &T, needle: &str) -> bool {
    T::SEARCH_FIELDS
        .iter()
        .any(|field| field_matches(field, record, needle))
}

/// Derive the filtered view of `collection` for `term`.
///
/// An empty term yields a copy of the whole collection in its original order.
/// Otherwise the term is lower-cased once and matched as a substring against
/// each record's search fields.
pub fn filter<T: Searchable + Clone>(collection: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return collection.to_vec();
    }
    let needle = term.to_lowercase();
    collection
        .iter()
        .filter(|record| matches(*record, &needle))
        .cloned()
        .collect()
}
