//! Form controls with validation applied on every change.
//!
//! A [`Control`] holds the raw text the operator typed plus the rules it must
//! satisfy. Empty values only fail [`Rule::Required`]; every other rule skips
//! empty input so that "missing" and "malformed" are reported separately.

use thiserror::Error;

/// Client panel form.
pub mod client;
/// Instructor panel form.
pub mod instructor;


pub use client::{ClientField, ClientForm};
pub use instructor::{InstructorField, InstructorForm};

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_LABEL_MAX_LEN: usize = 63;
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Exactly `n` ASCII digits.
    Digits(usize),
    /// Peruvian mobile number: `9` followed by eight digits.
    MobilePhone,
    Email,
    /// Integer within the inclusive bounds.
    IntegerBetween(i64, i64),
    /// Calendar date written as `YYYY-MM-DD`.
    IsoDate,
    OneOf(&'static [&'static str]),
}

/// Why a control's value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("is required")]
    Required,
    #[error("must be exactly {0} digits")]
    Digits(usize),
    #[error("must be 9 followed by 8 digits")]
    MobilePhone,
    #[error("must be a valid email address")]
    Email,
    #[error("must be a whole number")]
    NotInteger,
    #[error("must be at least {0}")]
    Min(i64),
    #[error("must be at most {0}")]
    Max(i64),
    #[error("must be a date in YYYY-MM-DD form")]
    IsoDate,
    #[error("must be one of: {}", .0.join(", "))]
    OneOf(&'static [&'static str]),
}

fn is_exact_digits(value: &str, n: usize) -> bool {
    value.len() == n && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_mobile_phone(value: &str) -> bool {
    value.len() == 9 && value.starts_with('9') && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_email_local_atom(atom: &str) -> bool {
    !atom.is_empty()
        && atom
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(ch))
}

fn is_email_domain_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= EMAIL_LABEL_MAX_LEN
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        && bytes[0] != b'-'
        && bytes[bytes.len() - 1] != b'-'
}

/// Email shape check equivalent to the usual browser form validator.
///
/// The domain does not need a dot (`user@localhost` is accepted).
pub fn is_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.len() > EMAIL_LOCAL_MAX_LEN {
        return false;
    }
    local.split('.').all(is_email_local_atom) && domain.split('.').all(is_email_domain_label)
}

fn is_iso_date(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl Rule {
    /// Check `value` against this rule.
    ///
    /// # Returns
    /// `None` when the value satisfies the rule.
    pub fn check(&self, value: &str) -> Option<Violation> {
        if value.is_empty() {
            return match self {
                Self::Required => Some(Violation::Required),
                _ => None,
            };
        }
        match self {
            Self::Required => None,
            Self::Digits(n) => (!is_exact_digits(value, *n)).then_some(Violation::Digits(*n)),
            Self::MobilePhone => (!is_mobile_phone(value)).then_some(Violation::MobilePhone),
            Self::Email => (!is_email(value)).then_some(Violation::Email),
            Self::IntegerBetween(min, max) => match value.trim().parse::<i64>() {
                Ok(parsed) if parsed < *min => Some(Violation::Min(*min)),
                Ok(parsed) if parsed > *max => Some(Violation::Max(*max)),
                Ok(_) => None,
                Err(_) => Some(Violation::NotInteger),
            },
            Self::IsoDate => (!is_iso_date(value)).then_some(Violation::IsoDate),
            Self::OneOf(options) => {
                let known = options.iter().any(|option| *option == value);
                (!known).then_some(Violation::OneOf(*options))
            }
        }
    }
}

/// One form input: its current text, rules, and the violations of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    value: String,
    rules: Vec<Rule>,
    errors: Vec<Violation>,
    touched: bool,
}

impl Control {
    pub fn new(value: impl Into<String>, rules: Vec<Rule>) -> Self {
        let mut control = Self {
            value: value.into(),
            rules,
            errors: Vec::new(),
            touched: false,
        };
        control.update_validity();
        control
    }

    /// A control without rules.
    pub fn optional() -> Self {
        Self::new(String::new(), Vec::new())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and re-run the rules.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.update_validity();
    }

    /// Swap the rule set. Call [`Control::update_validity`] to re-check the
    /// current value against it.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn update_validity(&mut self) {
        self.errors = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(&self.value))
            .collect();
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Errors worth showing: only once the operator has interacted with the control.
    pub fn visible_errors(&self) -> &[Violation] {
        if self.touched {
            &self.errors
        } else {
            &[]
        }
    }

    /// Restore `value`, clear the touched flag and re-validate.
    pub fn reset(&mut self, value: impl Into<String>) {
        self.touched = false;
        self.set_value(value);
    }
}

/// Behaviour shared by the per-resource panel forms.
pub trait ResourceForm {
    /// Field identifier used in error listings.
    type Field: Copy + std::fmt::Display;

    /// Restore the form to its blank defaults.
    fn reset(&mut self);

    fn is_valid(&self) -> bool;

    fn mark_all_touched(&mut self);

    /// All current violations, in field order.
    fn violations(&self) -> Vec<(Self::Field, Violation)>;
}

/// Map empty text to `None`; optional multipart fields are omitted when empty.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
