//! Placement rules the aggregator inherits from the registry's reference
//! output.
//!
//! These are kept apart from the classification rules so they can change
//! independently: first-seen region codes, silently dropping records with
//! no region, and the childless districts of the autonomous city.

use regiontree_shared::Classification;

use crate::classifier::AUTONOMOUS_CITY;

/// Width of a region code prefix.
pub const REGION_CODE_LEN: usize = 2;

/// Width of a district code prefix.
pub const DISTRICT_CODE_LEN: usize = 5;

/// Width of a full locality code.
pub const LOCALITY_CODE_LEN: usize = 10;

/// The region a classified record belongs to.
///
/// `None` means the record cannot be placed in any tree and is dropped
/// without being reported.
pub fn region_key(classification: &Classification) -> Option<&str> {
    classification
        .region
        .as_deref()
        .filter(|name| !name.is_empty())
}

/// Region code taken from the first record seen for that region. Later
/// records are not checked against it.
pub fn region_code(first_code: &str) -> String {
    prefix(first_code, REGION_CODE_LEN)
}

pub fn district_code(code: &str) -> String {
    prefix(code, DISTRICT_CODE_LEN)
}

/// Full code, right-padded with zeros so short codes keep their prefix
/// meaning.
pub fn locality_code(code: &str) -> String {
    format!("{code:0<width$}", width = LOCALITY_CODE_LEN)
}

/// Regions whose district nodes never receive locality leaves.
///
/// Only the autonomous city is flattened this way.
pub fn is_flattened_region(region: &str) -> bool {
    region == AUTONOMOUS_CITY
}

fn prefix(code: &str, len: usize) -> String {
    code.chars().take(len).collect()
}
