use std::{
  collections::HashMap,
  path::Path,
  sync::Arc,
  time::{SystemTime, UNIX_EPOCH},
};

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
  dataset, filter, images,
  models::{
    DatasetSummary, Filter, ImageRef, PathStat, RecordImages, SearchHit, SearchQuery, SessionInfo,
  },
  paths, search,
};

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("unknown session: {0}")]
  UnknownSession(String),
  #[error("invalid argument: {0}")]
  InvalidArg(String),
}

#[derive(Debug, Clone)]
pub struct ViewerOptions {
  /// Record key used as the human-readable label in search hits and galleries.
  pub label_key: String,
  /// Search hit cap used when a query passes `max_hits == 0`.
  pub default_max_hits: usize,
}

impl Default for ViewerOptions {
  fn default() -> Self {
    Self {
      label_key: "specificEpithet".to_string(),
      default_max_hits: 20,
    }
  }
}

#[derive(Debug, Clone)]
struct SessionState {
  info: SessionInfo,
  records: Arc<Vec<Value>>,
  // Derived once at open; the dataset is immutable for the session.
  path_stats: Arc<Vec<PathStat>>,
  summary: DatasetSummary,
}

#[derive(Clone)]
pub struct ViewerEngine {
  options: ViewerOptions,
  sessions: Arc<Mutex<HashMap<String, SessionState>>>,
}

impl ViewerEngine {
  pub fn new(options: ViewerOptions) -> Self {
    Self {
      options,
      sessions: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  /// API: open_file(path) -> { session, summary }
  ///
  /// Never fails: load problems degrade to an empty-dataset session (logged),
  /// and every query below tolerates an empty dataset.
  pub fn open_file(&self, path: impl AsRef<Path>) -> (SessionInfo, DatasetSummary) {
    let path = path.as_ref();
    let records = dataset::load_dataset_file(path);
    self.open(records, path.to_string_lossy().to_string())
  }

  /// API: open an already-materialized dataset (embedding, tests).
  pub fn open_records(&self, records: Vec<Value>) -> (SessionInfo, DatasetSummary) {
    self.open(records, "<memory>".to_string())
  }

  fn open(&self, records: Vec<Value>, path: String) -> (SessionInfo, DatasetSummary) {
    let path_stats = paths::analyze_paths(&records);
    let summary = DatasetSummary {
      total_records: records.len() as u64,
      total_paths: path_stats.len() as u64,
      avg_completeness_pct: paths::average_completeness(&path_stats, records.len()),
    };
    let info = SessionInfo {
      session_id: Uuid::new_v4().to_string(),
      path,
      record_count: records.len() as u64,
      created_at_ms: now_ms(),
    };
    debug!(
      session_id = %info.session_id,
      records = info.record_count,
      paths = summary.total_paths,
      "dataset session opened"
    );
    let state = SessionState {
      info: info.clone(),
      records: Arc::new(records),
      path_stats: Arc::new(path_stats),
      summary: summary.clone(),
    };
    self.sessions.lock().insert(info.session_id.clone(), state);
    (info, summary)
  }

  /// API: summary(session_id) -> DatasetSummary
  pub fn summary(&self, session_id: &str) -> Result<DatasetSummary, CoreError> {
    Ok(self.session(session_id)?.summary)
  }

  /// API: path_stats(session_id) -> [PathStat], sorted by fill rate descending.
  pub fn path_stats(&self, session_id: &str) -> Result<Vec<PathStat>, CoreError> {
    Ok(self.session(session_id)?.path_stats.as_ref().clone())
  }

  /// API: records(session_id) -> the full dataset, for list rendering.
  pub fn records(&self, session_id: &str) -> Result<Arc<Vec<Value>>, CoreError> {
    Ok(self.session(session_id)?.records)
  }

  /// API: record(session_id, index) -> one record, for the detail view.
  pub fn record(&self, session_id: &str, index: usize) -> Result<Value, CoreError> {
    let state = self.session(session_id)?;
    state
      .records
      .get(index)
      .cloned()
      .ok_or_else(|| CoreError::InvalidArg(format!("record index {index} out of range")))
  }

  pub fn record_label(&self, session_id: &str, index: usize) -> Result<Option<String>, CoreError> {
    let state = self.session(session_id)?;
    let record = state
      .records
      .get(index)
      .ok_or_else(|| CoreError::InvalidArg(format!("record index {index} out of range")))?;
    Ok(dataset::record_label(record, &self.options.label_key))
  }

  /// API: filter_records(session_id, filters) -> matching records, dataset order.
  pub fn filter_records(
    &self,
    session_id: &str,
    filters: &[Filter],
  ) -> Result<Vec<Value>, CoreError> {
    let state = self.session(session_id)?;
    Ok(filter::apply_filters(&state.records, filters))
  }

  /// API: search(session_id, query) -> capped hit list, labeled per record.
  pub fn search(&self, session_id: &str, query: &SearchQuery) -> Result<Vec<SearchHit>, CoreError> {
    let state = self.session(session_id)?;
    let max_hits = if query.max_hits == 0 {
      self.options.default_max_hits
    } else {
      query.max_hits
    };
    Ok(search::search_dataset(
      &state.records,
      query,
      &self.options.label_key,
      max_hits,
    ))
  }

  /// API: record_images(session_id, index) -> images of one record.
  pub fn record_images(&self, session_id: &str, index: usize) -> Result<Vec<ImageRef>, CoreError> {
    let state = self.session(session_id)?;
    let record = state
      .records
      .get(index)
      .ok_or_else(|| CoreError::InvalidArg(format!("record index {index} out of range")))?;
    Ok(images::extract_images(record))
  }

  /// API: dataset_images(session_id) -> per-record image groups, dataset order.
  pub fn dataset_images(&self, session_id: &str) -> Result<Vec<RecordImages>, CoreError> {
    let state = self.session(session_id)?;
    Ok(
      state
        .records
        .iter()
        .map(|record| RecordImages {
          label: dataset::record_label(record, &self.options.label_key),
          images: images::extract_images(record),
        })
        .collect(),
    )
  }

  pub fn close_session(&self, session_id: &str) -> Result<(), CoreError> {
    self
      .sessions
      .lock()
      .remove(session_id)
      .map(|_| ())
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))
  }

  fn session(&self, session_id: &str) -> Result<SessionState, CoreError> {
    self
      .sessions
      .lock()
      .get(session_id)
      .cloned()
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))
  }
}

fn now_ms() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_millis() as i64
}
