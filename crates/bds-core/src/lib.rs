//! Blood bank domain rules.
//!
//! - [`screening`]: reading interpretation (REACTIVE / BORDERLINE / NON-REACTIVE)
//! - [`fetch`]: complete-or-failed loading of records for a date range
//! - [`numbering`]: document number allocation through the backend
//! - [`crossmatch`]: crossmatch save and its side effects

pub mod crossmatch;
pub mod error;
pub mod fetch;
pub mod numbering;
pub mod screening;

pub use crossmatch::{CrossmatchSaved, save_crossmatch};
pub use error::{CoreError, Result};
pub use fetch::{date_range_query, decode_rows, fetch_bleeding_records, fetch_crossmatch_records};
pub use numbering::{AllocationError, DocumentNumberProvider, StoreNumberProvider};
pub use screening::{RecordScreening, classify, interpret, interpret_for_assay, screen_record};
