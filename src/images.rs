use serde_json::Value;

use crate::models::ImageRef;

/// Reserved keys recognized by structural convention.
pub const IMAGE_URL_KEY: &str = "imageUrl";
pub const IMAGE_LEGEND_KEY: &str = "imageUrlLegend";

/// Collect every `imageUrl` (with optional sibling `imageUrlLegend`) in a
/// record. Nested carriers are found independently: descent does not stop at
/// the first match. Within one object, images found in children are emitted
/// before the object's own pair.
pub fn extract_images(record: &Value) -> Vec<ImageRef> {
  let mut out = Vec::new();
  let mut path = Vec::new();
  walk(record, &mut path, &mut out);
  out
}

fn walk(value: &Value, path: &mut Vec<String>, out: &mut Vec<ImageRef>) {
  match value {
    Value::Array(items) => {
      for (i, item) in items.iter().enumerate() {
        path.push(format!("[{i}]"));
        walk(item, path, out);
        path.pop();
      }
    }
    Value::Object(map) => {
      let mut url: Option<&str> = None;
      let mut legend: Option<&str> = None;
      for (key, child) in map {
        match key.as_str() {
          IMAGE_URL_KEY => url = child.as_str(),
          IMAGE_LEGEND_KEY => legend = child.as_str(),
          _ => {
            path.push(key.clone());
            walk(child, path, out);
            path.pop();
          }
        }
      }
      if let Some(url) = url {
        out.push(ImageRef {
          path: if path.is_empty() {
            "root".to_string()
          } else {
            path.join(".")
          },
          url: url.to_string(),
          legend: legend.map(str::to_string),
        });
      }
    }
    _ => {}
  }
}
