//! Machine-readable report output.

use bds_model::ReportSummary;

use crate::error::{ReportError, Result};

/// Label of the closing row in CSV exports.
pub const TOTAL_LABEL: &str = "Total";

/// Render a summary as `label,count` CSV with a closing total row.
pub fn summary_to_csv(summary: &ReportSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["label", "count"])?;
    for row in &summary.rows {
        let count = row.count.to_string();
        writer.write_record([row.label.as_str(), count.as_str()])?;
    }
    let total = summary.total.to_string();
    writer.write_record([TOTAL_LABEL, total.as_str()])?;
    let bytes = writer
        .into_inner()
        .map_err(|error| ReportError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ReportError::Encoding)
}

/// Pretty-printed JSON of any report value.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
