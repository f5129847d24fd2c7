use bds_model::ModelError;
use bds_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("row {index} of table {table} could not be read: {message}")]
    Decode {
        table: String,
        index: usize,
        message: String,
    },
    #[error("failed to encode {table} row: {message}")]
    Encode { table: String, message: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
