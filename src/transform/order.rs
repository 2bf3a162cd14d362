//! Document ordering by front matter fields.

use crate::source::Document;
use serde_json::Value;
use std::cmp::Ordering;

/// One sort criterion: `"timestamp"` ascending, `"-timestamp"` descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey<'a> {
    pub field: &'a str,
    pub descending: bool,
}

impl<'a> SortKey<'a> {
    pub fn parse(key: &'a str) -> Self {
        match key.strip_prefix('-') {
            Some(field) => Self {
                field,
                descending: true,
            },
            None => Self {
                field: key,
                descending: false,
            },
        }
    }
}

/// Sort documents by the given keys, first key first.
///
/// The sort is stable: documents that compare equal on every key keep their
/// input order. Missing values sort before present ones when ascending, and
/// therefore after them when descending.
pub fn order_documents(mut documents: Vec<Document>, sort_by: &[&str]) -> Vec<Document> {
    let keys: Vec<SortKey> = sort_by.iter().map(|key| SortKey::parse(key)).collect();

    documents.sort_by(|a, b| {
        keys.iter()
            .map(|key| {
                let ordering = compare_values(&a.field(key.field), &b.field(key.field));
                if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    documents
}

/// Total order over front matter values.
///
/// `null < bool < number < string < everything else`; values of the same kind
/// compare naturally, strings by code point.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a
                .as_f64()
                .unwrap_or_default()
                .total_cmp(&b.as_f64().unwrap_or_default()),
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}
