//! Screening assays and their qualitative results.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cutoff shared by all four infectious-marker assays.
pub const SCREENING_CUTOFF: Decimal = dec!(1.00);

/// Transfusion-transmissible infection screening assay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assay {
    /// Hepatitis B surface antigen.
    HBsAg,
    /// Hepatitis C antibody.
    Hcv,
    /// HIV antibody.
    Hiv,
    /// Syphilis (VDRL).
    Vdrl,
}

impl Assay {
    pub const ALL: [Assay; 4] = [Assay::HBsAg, Assay::Hcv, Assay::Hiv, Assay::Vdrl];

    /// Column holding the reading on a bleeding record.
    pub fn column(self) -> &'static str {
        match self {
            Assay::HBsAg => "hbsag",
            Assay::Hcv => "hcv",
            Assay::Hiv => "hiv",
            Assay::Vdrl => "vdrl",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Assay::HBsAg => "HBsAg",
            Assay::Hcv => "HCV",
            Assay::Hiv => "HIV",
            Assay::Vdrl => "VDRL",
        }
    }

    pub fn cutoff(self) -> Decimal {
        SCREENING_CUTOFF
    }
}

impl fmt::Display for Assay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A reading produced by a screening assay together with the cutoff it is
/// judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabMeasurement {
    pub value: Decimal,
    pub cutoff: Decimal,
}

impl LabMeasurement {
    pub fn new(value: Decimal, cutoff: Decimal) -> Self {
        Self { value, cutoff }
    }

    pub fn for_assay(assay: Assay, value: Decimal) -> Self {
        Self::new(value, assay.cutoff())
    }
}

/// Three-valued qualitative screening outcome.
///
/// Always derived from a [`LabMeasurement`]; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningResult {
    Reactive,
    BorderlineReactive,
    NonReactive,
}

impl ScreeningResult {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreeningResult::Reactive => "REACTIVE",
            ScreeningResult::BorderlineReactive => "BORDERLINE REACTIVE",
            ScreeningResult::NonReactive => "NON-REACTIVE",
        }
    }

    pub fn is_reactive(self) -> bool {
        matches!(self, ScreeningResult::Reactive)
    }
}

impl fmt::Display for ScreeningResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
