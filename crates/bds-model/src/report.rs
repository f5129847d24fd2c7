use serde::{Deserialize, Serialize};

/// Label shown for records whose grouping field is missing.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One row of a summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBucket {
    pub label: String,
    pub count: usize,
}

impl ReportBucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A titled two-column summary with its grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub title: String,
    pub rows: Vec<ReportBucket>,
    pub total: usize,
}

impl ReportSummary {
    /// Build a summary whose total is the sum of its rows.
    pub fn from_rows(title: impl Into<String>, rows: Vec<ReportBucket>) -> Self {
        let total = rows.iter().map(|row| row.count).sum();
        Self {
            title: title.into(),
            rows,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count_for(&self, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.count)
    }
}
