//! Grouping documents by a field value.

use crate::source::Document;
use std::collections::BTreeMap;

/// Group documents by the value of `field`.
///
/// List fields such as `tags` put a document into one group per element.
/// Documents without the field are left out. Each group keeps input order.
pub fn group_documents(documents: &[Document], field: &str) -> BTreeMap<String, Vec<Document>> {
    let mut groups: BTreeMap<String, Vec<Document>> = BTreeMap::new();
    for document in documents {
        for key in document.group_keys(field) {
            groups.entry(key).or_default().push(document.clone());
        }
    }
    groups
}
