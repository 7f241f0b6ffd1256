//! Input validation shared by venue, artist and show inputs.
//!
//! # Invariants
//! - Validation never touches storage.
//! - Blank optional text is normalized to `None` before validation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9(][0-9().\- ]{5,18}[0-9]$").expect("valid phone regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("valid link regex"));

/// Checkbox values that mean "checked".
const CHECKED_VALUES: [&str; 4] = ["y", "on", "true", "1"];

/// Field-level validation failure for directory inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace.
    BlankField(&'static str),
    /// Phone does not look like a phone number.
    InvalidPhone(String),
    /// Link is not an absolute http(s) URL.
    InvalidLink { field: &'static str, value: String },
    /// Genre label outside the fixed set.
    UnknownGenre(String),
    /// Seeking flag set without a description.
    MissingSeekingDescription,
    /// Referenced id is not a valid database id.
    InvalidReference { field: &'static str, id: i64 },
    /// Start time text cannot be parsed.
    InvalidStartTime(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidPhone(value) => write!(f, "invalid phone number `{value}`"),
            Self::InvalidLink { field, value } => {
                write!(f, "`{field}` must be an http(s) link, got `{value}`")
            }
            Self::UnknownGenre(value) => write!(f, "unknown genre `{value}`"),
            Self::MissingSeekingDescription => {
                write!(f, "seeking description is required when seeking is set")
            }
            Self::InvalidReference { field, id } => write!(f, "`{field}` has invalid id {id}"),
            Self::InvalidStartTime(value) => write!(f, "invalid start time `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Derives a boolean from a submitted checkbox field.
///
/// Absent fields and any value outside `y|on|true|1` are unchecked.
pub fn checkbox_value(value: Option<&str>) -> bool {
    value.is_some_and(|raw| {
        let trimmed = raw.trim();
        CHECKED_VALUES
            .iter()
            .any(|checked| checked.eq_ignore_ascii_case(trimmed))
    })
}

/// Trims optional text and maps blank values to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn validate_phone(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(phone) if !PHONE_RE.is_match(phone) => {
            Err(ValidationError::InvalidPhone(phone.to_string()))
        }
        _ => Ok(()),
    }
}

pub(crate) fn validate_link(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(link) if !LINK_RE.is_match(link) => Err(ValidationError::InvalidLink {
            field,
            value: link.to_string(),
        }),
        _ => Ok(()),
    }
}

pub(crate) fn validate_seeking(
    seeking: bool,
    description: Option<&str>,
) -> Result<(), ValidationError> {
    if seeking && description.is_none() {
        return Err(ValidationError::MissingSeekingDescription);
    }
    Ok(())
}

pub(crate) fn validate_reference(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::InvalidReference { field, id });
    }
    Ok(())
}
