pub mod enums;
pub mod error;
pub mod ids;
pub mod records;
pub mod report;
pub mod screening;
pub mod serde_helpers;

pub use enums::{
    BagType, BloodGroup, CodeList, Coded, CrossmatchOutcome, DonorCategory, Reactivity, RhFactor,
};
pub use error::{ModelError, Result};
pub use ids::{DocumentKind, DocumentNumber};
pub use records::{BleedingRecord, CrossmatchRecord, DateRange};
pub use report::{ReportBucket, ReportSummary, UNKNOWN_LABEL};
pub use screening::{Assay, LabMeasurement, SCREENING_CUTOFF, ScreeningResult};
pub use serde_helpers::parse_decimal;
