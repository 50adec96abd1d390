use http::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ClientError;

/// Raw header value as supplied by callers, before normalization into a [`HeaderMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderInput {
  Value(String),
  /// Every element is appended under the same name.
  List(Vec<String>),
  /// Objects are sent JSON-encoded.
  Json(Value),
  /// Deletes any inherited value for this name.
  Remove,
}

impl From<&str> for HeaderInput {
  fn from(value: &str) -> Self {
    Self::Value(value.to_string())
  }
}

impl From<String> for HeaderInput {
  fn from(value: String) -> Self {
    Self::Value(value)
  }
}

impl From<bool> for HeaderInput {
  fn from(value: bool) -> Self {
    Self::Value(value.to_string())
  }
}

impl From<i64> for HeaderInput {
  fn from(value: i64) -> Self {
    Self::Value(value.to_string())
  }
}

impl From<Vec<String>> for HeaderInput {
  fn from(values: Vec<String>) -> Self {
    Self::List(values)
  }
}

impl<T: Into<HeaderInput>> From<Option<T>> for HeaderInput {
  fn from(value: Option<T>) -> Self {
    value.map_or(Self::Remove, Into::into)
  }
}

impl From<Value> for HeaderInput {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => Self::Remove,
      Value::String(s) => Self::Value(s),
      Value::Bool(b) => Self::Value(b.to_string()),
      Value::Number(n) => Self::Value(n.to_string()),
      Value::Array(items) => Self::List(items.into_iter().map(|item| scalar_text(&item)).collect()),
      object @ Value::Object(_) => Self::Json(object),
    }
  }
}

fn scalar_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Overlays `overrides` onto `base` key by key.
///
/// Names present in `overrides` replace the inherited values; names absent
/// from it keep theirs.
pub fn merge_headers(base: &HeaderMap, overrides: &IndexMap<String, HeaderInput>) -> Result<HeaderMap, ClientError> {
  let mut merged = base.clone();

  for (name, input) in overrides {
    let header_name = HeaderName::try_from(name.as_str()).map_err(|err| ClientError::Header {
      name: name.clone(),
      source: err.into(),
    })?;
    merged.remove(&header_name);

    match input {
      HeaderInput::Remove => {}
      HeaderInput::Value(value) => {
        merged.insert(header_name, header_value(name, value)?);
      }
      HeaderInput::Json(value) => {
        merged.insert(header_name, header_value(name, &value.to_string())?);
      }
      HeaderInput::List(values) => {
        for value in values {
          merged.append(header_name.clone(), header_value(name, value)?);
        }
      }
    }
  }

  Ok(merged)
}

/// Same as [`merge_headers`] for two already-normalized maps.
#[must_use]
pub fn merge_header_maps(base: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
  let mut merged = base.clone();
  for name in overrides.keys() {
    merged.remove(name);
    for value in overrides.get_all(name) {
      merged.append(name.clone(), value.clone());
    }
  }
  merged
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
  HeaderValue::from_str(value).map_err(|err| ClientError::Header {
    name: name.to_string(),
    source: err.into(),
  })
}
