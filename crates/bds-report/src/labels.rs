//! Display labels for grouped fields.
//!
//! Every label a report shows comes from the code lists in `bds_model`
//! (see [`CodeList::label`]); this module only decides what a missing value
//! and a blood-group pair look like.

use bds_model::{BloodGroup, CodeList, Coded, RhFactor, UNKNOWN_LABEL};

/// Label for an optional coded value; blank or missing values are unknown.
pub fn coded_label<T: CodeList>(value: Option<&Coded<T>>) -> Option<String> {
    value
        .filter(|coded| !coded.is_blank())
        .map(|coded| coded.label().trim().to_string())
}

/// Blood-group key such as `A +ve`.
///
/// A missing group is unknown; a group without an Rh factor is shown alone.
pub fn blood_group_label(
    group: Option<&Coded<BloodGroup>>,
    rh: Option<&Coded<RhFactor>>,
) -> Option<String> {
    let group = coded_label(group)?;
    Some(match coded_label(rh) {
        Some(rh) => format!("{group} {rh}"),
        None => group,
    })
}

/// Label used in report rows, substituting [`UNKNOWN_LABEL`] for missing or
/// blank values.
pub fn display_label(label: Option<String>) -> String {
    label
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// The full `(code, label)` table of a code list, in declaration order.
pub fn label_table<T: CodeList>() -> Vec<(&'static str, &'static str)> {
    T::ALL
        .iter()
        .map(|variant| (variant.code(), variant.label()))
        .collect()
}
