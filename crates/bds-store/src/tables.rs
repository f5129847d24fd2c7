//! Table and procedure names used by the blood bank backend.

pub const BLEEDING: &str = "bleeding";
pub const CROSSMATCH: &str = "crossmatch";
pub const DONOR_PRODUCTS: &str = "donor_products";
pub const PRE_CROSSMATCH_REQUESTS: &str = "pre_crossmatch_requests";

/// Procedure allocating the next patient/invoice/donor number.
pub const GENERATE_DOCUMENT_NUMBER: &str = "generate_document_number";
