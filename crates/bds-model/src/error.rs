use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid document number: {0:?}")]
    InvalidDocumentNumber(String),
    #[error("unknown document kind: {0}")]
    UnknownDocumentKind(String),
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: String, to: String },
    #[error("crossmatch record has no donor bag numbers")]
    MissingBagNumbers,
    #[error("crossmatch record has no patient")]
    MissingPatient,
}

pub type Result<T> = std::result::Result<T, ModelError>;
