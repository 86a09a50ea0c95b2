use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::models::PathStat;

/// Resolve a dotted path against one record.
///
/// Splits on `.`, ignores array-marker segments (`[]` suffixes and `[i]`
/// segments produced by the index-qualified conventions), and folds left,
/// returning `None` as soon as the current value is not an object or the key
/// is absent. Never fails; a `null` leaf resolves to `Some(Null)`.
pub fn get_by_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
  let mut current = record;
  for seg in path_segments(path) {
    current = current.as_object()?.get(seg)?;
  }
  Some(current)
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('.').filter_map(|seg| {
    let seg = seg.trim_end_matches("[]");
    if seg.is_empty() || (seg.starts_with('[') && seg.ends_with(']')) {
      None
    } else {
      Some(seg)
    }
  })
}

/// The emptiness rule shared by PathIndex and the analytics summary: a value
/// is meaningful unless it is absent, null, an empty string, an empty object,
/// or an empty array.
pub fn is_meaningful_value(value: Option<&Value>) -> bool {
  match value {
    None | Some(Value::Null) => false,
    Some(Value::String(s)) => !s.is_empty(),
    Some(Value::Array(items)) => !items.is_empty(),
    Some(Value::Object(map)) => !map.is_empty(),
    Some(_) => true,
  }
}

/// Enumerate every distinct field path reachable in `value`. Object keys grow
/// the path; array elements are visited at the same prefix, so siblings of an
/// array-valued field collapse onto one path.
fn collect_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
  match value {
    Value::Array(items) => {
      for item in items {
        collect_paths(item, prefix, out);
      }
    }
    Value::Object(map) => {
      for (key, child) in map {
        let path = if prefix.is_empty() {
          key.clone()
        } else {
          format!("{prefix}.{key}")
        };
        out.insert(path.clone());
        collect_paths(child, &path, out);
      }
    }
    _ => {}
  }
}

/// Build the path catalog for a dataset: every distinct path, with presence
/// counts recomputed over the whole dataset and a histogram of observed
/// string values. Sorted by `has_value_count` descending (stable, so ties
/// keep alphabetical order).
pub fn analyze_paths(records: &[Value]) -> Vec<PathStat> {
  let mut paths = BTreeSet::new();
  for record in records {
    collect_paths(record, "", &mut paths);
  }

  let mut stats: Vec<PathStat> = paths
    .into_iter()
    .map(|path| {
      let mut has_key_count = 0u64;
      let mut has_value_count = 0u64;
      let mut histogram: BTreeMap<String, u64> = BTreeMap::new();
      for record in records {
        let resolved = get_by_path(record, &path);
        if resolved.is_some() {
          has_key_count += 1;
        }
        if is_meaningful_value(resolved) {
          has_value_count += 1;
        }
        match resolved {
          Some(Value::String(s)) => {
            *histogram.entry(s.clone()).or_insert(0) += 1;
          }
          Some(Value::Array(items)) => {
            // Non-string elements still count toward presence above, but are
            // not tallied.
            for item in items {
              if let Value::String(s) = item {
                *histogram.entry(s.clone()).or_insert(0) += 1;
              }
            }
          }
          _ => {}
        }
      }
      PathStat {
        path,
        has_key_count,
        has_value_count,
        value_histogram: if histogram.is_empty() {
          None
        } else {
          Some(histogram)
        },
      }
    })
    .collect();

  stats.sort_by(|a, b| b.has_value_count.cmp(&a.has_value_count));
  stats
}

/// Mean of per-path fill ratios, as a percentage. 0.0 when either the
/// dataset or the catalog is empty.
pub fn average_completeness(stats: &[PathStat], total_records: usize) -> f64 {
  if stats.is_empty() || total_records == 0 {
    return 0.0;
  }
  let ratio_sum: f64 = stats
    .iter()
    .map(|s| s.has_value_count as f64 / total_records as f64)
    .sum();
  ratio_sum / stats.len() as f64 * 100.0
}
