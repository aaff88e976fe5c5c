use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidEmail,
    InvalidDate,
    FileRequired,
}

impl FieldErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            FieldErrorKind::Required => "This field is required",
            FieldErrorKind::InvalidEmail => "Please enter a valid email address",
            FieldErrorKind::InvalidDate => "Please enter a date as YYYY-MM-DD",
            FieldErrorKind::FileRequired => "Please upload this document",
        }
    }
}

/// Outcome of a validation pass. An absent field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} form field(s) need attention", .entries.len())]
pub struct ValidationErrors {
    entries: BTreeMap<FieldId, FieldErrorKind>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldId, kind: FieldErrorKind) {
        self.entries.insert(field, kind);
    }

    pub fn get(&self, field: FieldId) -> Option<FieldErrorKind> {
        self.entries.get(&field).copied()
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, FieldErrorKind)> + '_ {
        self.entries.iter().map(|(field, kind)| (*field, *kind))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.entries.keys().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentRejection {
    #[error("only PDF files are accepted (declared type `{declared}`)")]
    NotPdf { declared: String },
    #[error("file is {size_bytes} bytes; the limit is {limit_bytes} bytes")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
    #[error("file content does not start with a PDF signature")]
    SignatureMismatch,
    #[error("file could not be read: {reason}")]
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} `{value}`")]
pub struct UnknownValue {
    pub what: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}
