//! YAML front matter between `---` lines.

use super::document::Fields;
use anyhow::{Result, bail};
use serde_json::Value;

/// Split `---\n<yaml>\n---\n<body>` into its parts.
///
/// Files without front matter return `(None, content)`.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let Some(after) = trimmed.strip_prefix("---") else {
        return (None, content);
    };
    if !after.starts_with(['\n', '\r']) {
        return (None, content);
    }

    // The closing delimiter is a line that is exactly `---`
    let mut offset = 0;
    for line in after.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = after[..offset].trim_end_matches(['\r', '\n']);
            return (Some(yaml), &after[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse front matter into a field map. Empty front matter yields no fields.
pub fn parse(yaml: &str) -> Result<Fields> {
    if yaml.trim().is_empty() {
        return Ok(Fields::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Fields::new()),
        other => bail!("front matter must be a mapping, got `{other}`"),
    }
}
