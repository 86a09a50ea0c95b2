use serde_json::Value;

use crate::{
  models::{Filter, FilterMode},
  paths::get_by_path,
};

/// Return the records matching every enabled filter, in dataset order.
/// Disabled filters are skipped; with no enabled filter the full dataset is
/// returned unchanged.
pub fn apply_filters(records: &[Value], filters: &[Filter]) -> Vec<Value> {
  let active: Vec<&Filter> = filters.iter().filter(|f| f.enabled).collect();
  if active.is_empty() {
    return records.to_vec();
  }
  records
    .iter()
    .filter(|record| active.iter().all(|f| filter_matches(record, f)))
    .cloned()
    .collect()
}

fn filter_matches(record: &Value, filter: &Filter) -> bool {
  let resolved = get_by_path(record, &filter.path);
  match filter.mode {
    // Presence only: an explicit empty string or null still matches.
    FilterMode::Property => resolved.is_some(),
    FilterMode::PropertyValue => match resolved {
      Some(value) => value_matches(value, &filter.value),
      None => false,
    },
  }
}

/// Loose equality between a resolved value and the filter's target string.
/// A resolved array matches when any element does.
pub(crate) fn value_matches(resolved: &Value, target: &str) -> bool {
  match resolved {
    Value::Array(items) => items.iter().any(|item| scalar_matches(item, target)),
    other => scalar_matches(other, target),
  }
}

/// Coercion chain: direct string equality, then numeric equality when both
/// sides parse as numbers (so "05" and 5 both equal "5"), then string-form
/// equality for the remaining scalars. Worst case is a non-match.
fn scalar_matches(value: &Value, target: &str) -> bool {
  if let Value::String(s) = value {
    if s == target {
      return true;
    }
  }
  if let (Some(n), Ok(t)) = (number_form(value), target.trim().parse::<f64>()) {
    if n == t {
      return true;
    }
  }
  match string_form(value) {
    Some(s) => s == target,
    None => false,
  }
}

fn number_form(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

fn string_form(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}
