//! Custom front matter field parsers.
//!
//! A registry keyed by field name. Each parser is a pure function of the raw
//! field value and the complete raw front matter, and its result replaces the
//! field. Parsers never see each other's output.
//!
//! ```ignore
//! let parsers = FieldParsers::new()
//!     .with("timestamp", parse_timestamp)
//!     .with("date", parse_date);
//! ```

use super::document::Fields;
use crate::utils::date::DateTimeUtc;
use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::collections::BTreeMap;

/// `(raw value, all raw fields) -> parsed value`
pub type FieldParser = fn(&Value, &Fields) -> Result<Value>;

#[derive(Clone, Default)]
pub struct FieldParsers {
    parsers: BTreeMap<String, FieldParser>,
}

impl FieldParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsers used by the blog build: `timestamp` and `date`, both derived
    /// from the `date` string.
    pub fn blog() -> Self {
        Self::new()
            .with("timestamp", parse_timestamp)
            .with("date", parse_date)
    }

    pub fn with(mut self, name: &str, parser: FieldParser) -> Self {
        self.parsers.insert(name.to_owned(), parser);
        self
    }

    /// Run every parser against a snapshot of the raw fields and store the
    /// results. `Null` results remove the field.
    pub fn apply(&self, fields: &mut Fields) -> Result<()> {
        if self.parsers.is_empty() {
            return Ok(());
        }

        let raw = fields.clone();
        for (name, parser) in &self.parsers {
            let value = raw.get(name).unwrap_or(&Value::Null);
            let parsed = parser(value, &raw).with_context(|| format!("field `{name}`"))?;
            match parsed {
                Value::Null => fields.remove(name),
                parsed => fields.insert(name.clone(), parsed),
            };
        }
        Ok(())
    }
}

/// Epoch seconds of the `date` field.
pub fn parse_timestamp(_raw: &Value, fields: &Fields) -> Result<Value> {
    Ok(source_date(fields)?.map_or(Value::Null, |date| Value::from(date.timestamp())))
}

/// The `date` field normalized to `YYYY-MM-DDTHH:MM:SSZ`.
pub fn parse_date(_raw: &Value, fields: &Fields) -> Result<Value> {
    Ok(source_date(fields)?.map_or(Value::Null, |date| Value::from(date.to_rfc3339())))
}

fn source_date(fields: &Fields) -> Result<Option<DateTimeUtc>> {
    match fields.get("date") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => DateTimeUtc::parse(s)
            .map(Some)
            .ok_or_else(|| anyhow!("unrecognized date `{s}`, expected YYYY-MM-DD[ HH:MM[:SS]]")),
        Some(other) => Err(anyhow!("date must be a string, got `{other}`")),
    }
}
