use bds_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to fetch report data: {0}")]
    Fetch(#[from] CoreError),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output is not valid UTF-8")]
    Encoding,

    #[error("unknown report kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
