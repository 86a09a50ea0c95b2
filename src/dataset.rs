use std::path::Path;

use serde_json::Value;
use tracing::warn;

/// Load a dataset file (a JSON array of records).
///
/// Load failures are not fatal: an unreadable file, malformed JSON, or a
/// scalar root all degrade to an empty dataset, surfaced only via a warning.
/// A root object is treated as a one-record dataset.
pub fn load_dataset_file(path: &Path) -> Vec<Value> {
  let text = match std::fs::read_to_string(path) {
    Ok(text) => text,
    Err(e) => {
      warn!(path = %path.display(), error = %e, "failed to read dataset file");
      return vec![];
    }
  };
  let root: Value = match serde_json::from_str(&text) {
    Ok(root) => root,
    Err(e) => {
      warn!(path = %path.display(), error = %e, "failed to parse dataset file");
      return vec![];
    }
  };
  match root {
    Value::Array(records) => records,
    obj @ Value::Object(_) => vec![obj],
    _ => {
      warn!(path = %path.display(), "dataset root is not an array or object");
      vec![]
    }
  }
}

/// Human-readable label of a record: the string at `label_key`, if any.
pub(crate) fn record_label(record: &Value, label_key: &str) -> Option<String> {
  record
    .get(label_key)
    .and_then(Value::as_str)
    .map(str::to_string)
}
