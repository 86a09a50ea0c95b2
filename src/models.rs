use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
  pub session_id: String,
  pub path: String,
  pub record_count: u64,
  pub created_at_ms: i64,
}

/// Headline numbers for the analytics view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
  pub total_records: u64,
  pub total_paths: u64,
  /// Mean of per-path `has_value_count / total_records`, as a percentage.
  /// 0.0 for an empty dataset.
  pub avg_completeness_pct: f64,
}

/// Presence/value statistics for one dotted field path across the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStat {
  pub path: String,
  /// Records where the path resolves at all (a null or empty value still counts).
  pub has_key_count: u64,
  /// Records where the resolved value is meaningful (not null/""/{}/[]).
  pub has_value_count: u64,
  /// Frequency of observed string values (string leaves and string elements
  /// of arrays). Absent when the path never resolves to a string.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value_histogram: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
  /// Match records where the path resolves to any defined value.
  Property,
  /// Match records where the resolved value equals `Filter.value` under the
  /// loose coercion rule (string, then numeric, then string-form).
  PropertyValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
  pub mode: FilterMode,
  pub path: String,
  pub value: String,
  /// Disabled filters stay in the UI state but are skipped during evaluation.
  pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
  pub term: String,
  pub search_keys: bool,
  pub search_values: bool,
  /// Hit cap applied after the full dataset has been scanned. 0 means the
  /// engine default.
  pub max_hits: usize,
}

impl Default for SearchQuery {
  fn default() -> Self {
    Self {
      term: String::new(),
      search_keys: true,
      search_values: true,
      max_hits: 0,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
  /// Dotted path to the match; sequence levels appear as `[i]` segments.
  pub path: String,
  /// The matched string value. `None` when the match was on a key name.
  pub value: Option<String>,
  /// Label of the owning record, when searching dataset-wide.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

/// An image located by structural convention (`imageUrl` / `imageUrlLegend`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
  /// Dotted path of the object carrying the pair; `"root"` at depth zero.
  pub path: String,
  pub url: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub legend: Option<String>,
}

/// Images of one record, for dataset-wide gallery rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordImages {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  pub images: Vec<ImageRef>,
}
