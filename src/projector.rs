//! Position-to-name index maps.

use indexmap::IndexMap;

use crate::record::Record;

/// Map from decimal position (`"0"`, `"1"`, ...) to record name, in
/// ascending position order.
pub type NameIndex = IndexMap<String, String>;

/// Project records onto their zero-based positions.
///
/// Empty input yields an empty map. Names are neither deduplicated nor
/// sorted.
pub fn project_index(records: &[Record]) -> NameIndex {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| (i.to_string(), record.name.clone()))
        .collect()
}
