use serde_json::Value;
use tracing::{info, info_span};

use bds_model::CrossmatchRecord;
use bds_store::{Filter, RowStore, tables};

use crate::error::{CoreError, Result};

/// Rows removed as a consequence of saving a crossmatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossmatchSaved {
    pub donor_products_removed: usize,
    pub requests_removed: usize,
}

/// Store a crossmatch and retire what it consumed.
///
/// The crossmatch row is written first. Only once it is stored are the
/// referenced donor products (by bag number) and the originating
/// pre-crossmatch request deleted; a failed insert deletes nothing.
pub fn save_crossmatch(
    store: &dyn RowStore,
    record: &CrossmatchRecord,
) -> Result<CrossmatchSaved> {
    record.validate()?;
    let span = info_span!("save_crossmatch", patient_id = %record.patient_id);
    let _guard = span.enter();

    let row = match serde_json::to_value(record) {
        Ok(Value::Object(row)) => row,
        Ok(other) => {
            return Err(CoreError::Encode {
                table: tables::CROSSMATCH.to_string(),
                message: format!("expected an object, got {other}"),
            });
        }
        Err(error) => {
            return Err(CoreError::Encode {
                table: tables::CROSSMATCH.to_string(),
                message: error.to_string(),
            });
        }
    };
    store.insert(tables::CROSSMATCH, row)?;

    let bags: Vec<&str> = record
        .bag_numbers
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|bag| !bag.is_empty())
        .collect();
    let donor_products_removed =
        store.delete(tables::DONOR_PRODUCTS, &[Filter::is_in("bag_no", bags)])?;
    let requests_removed = match &record.request_id {
        Some(request_id) => store.delete(
            tables::PRE_CROSSMATCH_REQUESTS,
            &[Filter::eq("id", request_id.as_str())],
        )?,
        None => 0,
    };
    info!(donor_products_removed, requests_removed, "crossmatch saved");
    Ok(CrossmatchSaved {
        donor_products_removed,
        requests_removed,
    })
}
