#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Kind of document an identifier is allocated for; the prefix token is
/// what the allocating procedure receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Patient,
    Invoice,
    Donor,
    Bag,
}

impl DocumentKind {
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentKind::Patient => "PAT",
            DocumentKind::Invoice => "INV",
            DocumentKind::Donor => "DON",
            DocumentKind::Bag => "BAG",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for DocumentKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PAT" | "PATIENT" => Ok(DocumentKind::Patient),
            "INV" | "INVOICE" => Ok(DocumentKind::Invoice),
            "DON" | "DONOR" => Ok(DocumentKind::Donor),
            "BAG" => Ok(DocumentKind::Bag),
            _ => Err(ModelError::UnknownDocumentKind(s.to_string())),
        }
    }
}

/// An identifier handed out by the backend. Opaque apart from being
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidDocumentNumber(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
