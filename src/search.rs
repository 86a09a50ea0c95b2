use serde_json::Value;

use crate::models::{SearchHit, SearchQuery};

/// Scan one record for case-insensitive substring matches on key names
/// and/or string values, per the query's toggles. An empty term short-circuits
/// to no hits. Matching never stops descent: a key hit, a value hit, and
/// nested hits under the same key can all be emitted.
pub fn search_record(record: &Value, query: &SearchQuery) -> Vec<SearchHit> {
  let term = query.term.to_lowercase();
  if term.is_empty() || (!query.search_keys && !query.search_values) {
    return vec![];
  }
  let mut hits = Vec::new();
  let mut path = Vec::new();
  walk(record, &term, query, &mut path, &mut hits);
  hits
}

/// Scan the whole dataset, tagging each hit with the owning record's label
/// and truncating to the hit cap only after every record has been visited.
pub fn search_dataset(
  records: &[Value],
  query: &SearchQuery,
  label_key: &str,
  max_hits: usize,
) -> Vec<SearchHit> {
  let term = query.term.to_lowercase();
  if term.is_empty() || (!query.search_keys && !query.search_values) {
    return vec![];
  }
  let mut hits = Vec::new();
  for record in records {
    let label = crate::dataset::record_label(record, label_key);
    let mut path = Vec::new();
    let mut record_hits = Vec::new();
    walk(record, &term, query, &mut path, &mut record_hits);
    for mut hit in record_hits {
      hit.label = label.clone();
      hits.push(hit);
    }
  }
  hits.truncate(max_hits);
  hits
}

fn walk(
  value: &Value,
  term: &str,
  query: &SearchQuery,
  path: &mut Vec<String>,
  hits: &mut Vec<SearchHit>,
) {
  match value {
    Value::Object(map) => {
      for (key, child) in map {
        if query.search_keys && key.to_lowercase().contains(term) {
          hits.push(SearchHit {
            path: joined(path, key),
            value: None,
            label: None,
          });
        }
        if query.search_values {
          if let Value::String(s) = child {
            if s.to_lowercase().contains(term) {
              hits.push(SearchHit {
                path: joined(path, key),
                value: Some(s.clone()),
                label: None,
              });
            }
          }
        }
        path.push(key.clone());
        walk(child, term, query, path, hits);
        path.pop();
      }
    }
    Value::Array(items) => {
      // Index markers disambiguate hits within the list; they carry no
      // lookup semantics.
      for (i, item) in items.iter().enumerate() {
        path.push(format!("[{i}]"));
        walk(item, term, query, path, hits);
        path.pop();
      }
    }
    _ => {}
  }
}

fn joined(path: &[String], key: &str) -> String {
  if path.is_empty() {
    key.to_string()
  } else {
    format!("{}.{}", path.join("."), key)
  }
}
