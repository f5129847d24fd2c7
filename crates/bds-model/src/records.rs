use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{
    BagType, BloodGroup, Coded, CrossmatchOutcome, DonorCategory, Reactivity, RhFactor,
};
use crate::error::{ModelError, Result};
use crate::screening::{Assay, LabMeasurement};
use crate::serde_helpers::{lenient_decimal, optional_id, required_id, string_list};

/// One donation/bleeding event as captured at the bleeding/screening desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleedingRecord {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub donor_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub bag_no: Option<String>,
    #[serde(default)]
    pub bag_type: Option<Coded<BagType>>,
    #[serde(default)]
    pub donor_category: Option<Coded<DonorCategory>>,
    #[serde(default)]
    pub blood_group_separate: Option<Coded<BloodGroup>>,
    #[serde(default)]
    pub rh_factor: Option<Coded<RhFactor>>,
    pub bleeding_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hbsag: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hcv: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hiv: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub vdrl: Option<Decimal>,
}

impl BleedingRecord {
    /// A record with only the bleeding date set.
    pub fn new(bleeding_date: NaiveDate) -> Self {
        Self {
            id: None,
            donor_id: None,
            bag_no: None,
            bag_type: None,
            donor_category: None,
            blood_group_separate: None,
            rh_factor: None,
            bleeding_date,
            hbsag: None,
            hcv: None,
            hiv: None,
            vdrl: None,
        }
    }

    /// Raw reading for an assay, if one was recorded.
    pub fn reading(&self, assay: Assay) -> Option<Decimal> {
        match assay {
            Assay::HBsAg => self.hbsag,
            Assay::Hcv => self.hcv,
            Assay::Hiv => self.hiv,
            Assay::Vdrl => self.vdrl,
        }
    }

    /// Reading for an assay paired with the assay's cutoff.
    pub fn measurement(&self, assay: Assay) -> Option<LabMeasurement> {
        self.reading(assay)
            .map(|value| LabMeasurement::for_assay(assay, value))
    }
}

/// A compatibility test between a patient and one or more donor products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossmatchRecord {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "required_id")]
    pub patient_id: String,
    /// Pre-crossmatch request this test fulfils.
    #[serde(default, deserialize_with = "optional_id")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub bag_numbers: Vec<String>,
    #[serde(default)]
    pub albumin: Option<Coded<Reactivity>>,
    #[serde(default)]
    pub saline: Option<Coded<Reactivity>>,
    #[serde(default)]
    pub coomb: Option<Coded<Reactivity>>,
    #[serde(default)]
    pub result: Option<Coded<CrossmatchOutcome>>,
    pub crossmatch_date: NaiveDate,
}

impl CrossmatchRecord {
    /// Check the fields a crossmatch cannot be saved without.
    pub fn validate(&self) -> Result<()> {
        if self.patient_id.trim().is_empty() {
            return Err(ModelError::MissingPatient);
        }
        if self.bag_numbers.iter().all(|bag| bag.trim().is_empty()) {
            return Err(ModelError::MissingBagNumbers);
        }
        Ok(())
    }

    pub fn is_compatible(&self) -> bool {
        matches!(
            self.result.as_ref().and_then(Coded::known),
            Some(CrossmatchOutcome::Compatible)
        )
    }
}

/// Inclusive range of calendar dates a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ModelError::InvalidDateRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}
