mod dataset;
mod engine;
mod filter;
mod images;
mod models;
mod paths;
mod search;

pub use crate::dataset::load_dataset_file;
pub use crate::engine::{CoreError, ViewerEngine, ViewerOptions};
pub use crate::filter::apply_filters;
pub use crate::images::{extract_images, IMAGE_LEGEND_KEY, IMAGE_URL_KEY};
pub use crate::models::{
  DatasetSummary, Filter, FilterMode, ImageRef, PathStat, RecordImages, SearchHit, SearchQuery,
  SessionInfo,
};
pub use crate::paths::{analyze_paths, average_completeness, get_by_path, is_meaningful_value};
pub use crate::search::{search_dataset, search_record};
