//! Patient, invoice and donor number allocation.
//!
//! Numbers come from a durable sequence on the backend, reached through a
//! stored procedure. Nothing here ever derives a number from local state:
//! two clients allocating at the same time must not collide.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use bds_model::{DocumentKind, DocumentNumber};
use bds_store::{Row, RowStore, StoreError, tables};

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("number allocation is not available on this backend ({procedure})")]
    Unavailable { procedure: String },
    #[error("backend failed to allocate a {kind} number: {source}")]
    Backend {
        kind: DocumentKind,
        #[source]
        source: StoreError,
    },
    #[error("backend returned an unusable {kind} number: {reply}")]
    InvalidReply { kind: DocumentKind, reply: String },
}

/// Source of freshly allocated, globally unique document numbers.
pub trait DocumentNumberProvider {
    fn allocate(&self, kind: DocumentKind) -> Result<DocumentNumber, AllocationError>;
}

/// Allocates numbers by calling the backend's numbering procedure.
pub struct StoreNumberProvider<'a> {
    store: &'a dyn RowStore,
    procedure: String,
}

impl<'a> StoreNumberProvider<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self {
            store,
            procedure: tables::GENERATE_DOCUMENT_NUMBER.to_string(),
        }
    }

    /// Use a differently named procedure.
    #[must_use]
    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = procedure.into();
        self
    }
}

impl DocumentNumberProvider for StoreNumberProvider<'_> {
    fn allocate(&self, kind: DocumentKind) -> Result<DocumentNumber, AllocationError> {
        let mut args = Row::new();
        args.insert("prefix".to_string(), Value::String(kind.prefix().to_string()));
        let reply = match self.store.call(&self.procedure, &args) {
            Ok(reply) => reply,
            Err(StoreError::UnsupportedProcedure(procedure)) => {
                warn!(%procedure, "document numbering procedure unavailable");
                return Err(AllocationError::Unavailable { procedure });
            }
            Err(source) => {
                warn!(%kind, error = %source, "document number allocation failed");
                return Err(AllocationError::Backend { kind, source });
            }
        };
        let number = match &reply {
            Value::String(text) => DocumentNumber::new(text.as_str()).ok(),
            _ => None,
        }
        .ok_or_else(|| AllocationError::InvalidReply {
            kind,
            reply: reply.to_string(),
        })?;
        info!(%kind, number = %number, "allocated document number");
        Ok(number)
    }
}
