//! Parent-to-children grouping and queries over the exported tree.
//!
//! The grouping is one level deep: every record with a parent is listed
//! under that parent's name, nothing more. Consumers that need the whole
//! subtree of an object walk the flat map with [`descendants`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::record::Record;

/// Parent name to sorted child names. Keys iterate in ordinal order.
pub type HierarchyMap = BTreeMap<String, Vec<String>>;

/// Group records under their direct parent's name.
///
/// Records without a parent are skipped. Both keys and child lists are
/// ordered by code point, case-sensitive. Duplicate child names are kept.
pub fn group_by_parent(records: &[Record]) -> HierarchyMap {
    let mut map = HierarchyMap::new();
    for record in records {
        if let Some(parent) = &record.parent {
            map.entry(parent.clone())
                .or_default()
                .push(record.name.clone());
        }
    }
    for children in map.values_mut() {
        children.sort();
    }
    map
}

/// Direct children of `parent`, empty when it has none.
pub fn children<'a>(map: &'a HierarchyMap, parent: &str) -> &'a [String] {
    map.get(parent).map(Vec::as_slice).unwrap_or(&[])
}

/// Every direct and indirect child of `root`.
///
/// Cycles in the input are tolerated; each name is visited once.
pub fn descendants(map: &HierarchyMap, root: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack: Vec<&str> = vec![root];
    let mut expanded: BTreeSet<&str> = BTreeSet::new();

    while let Some(current) = stack.pop() {
        if !expanded.insert(current) {
            continue;
        }
        for child in children(map, current) {
            found.insert(child.clone());
            stack.push(child.as_str());
        }
    }
    found
}

/// Read a previously exported tree file.
pub fn load_hierarchy(path: &Path) -> ExportResult<HierarchyMap> {
    let content = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
