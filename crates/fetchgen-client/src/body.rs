use bytes::Bytes;
use http::HeaderValue;
use serde::{
  Serialize,
  de::{
    DeserializeOwned, IntoDeserializer,
    value::{BytesDeserializer, Error as ValueError, SeqDeserializer, StrDeserializer, UnitDeserializer},
  },
};
use serde_json::Value;

use crate::query::{COMPONENT_ENCODE_SET, scalar_text};

/// Request payload before body serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
  /// Structured data, passed through the body serializer.
  Json(Value),
  /// Sent as-is.
  Text(String),
  /// Sent as-is.
  Raw(Bytes),
}

impl RequestBody {
  pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
    serde_json::to_value(value).map(Self::Json)
  }
}

impl From<Value> for RequestBody {
  fn from(value: Value) -> Self {
    Self::Json(value)
  }
}

impl From<String> for RequestBody {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<&str> for RequestBody {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<Bytes> for RequestBody {
  fn from(value: Bytes) -> Self {
    Self::Raw(value)
  }
}

impl From<Vec<u8>> for RequestBody {
  fn from(value: Vec<u8>) -> Self {
    Self::Raw(Bytes::from(value))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedBody {
  pub bytes: Bytes,
  /// Replaces the request's `Content-Type` when set.
  pub content_type: Option<HeaderValue>,
}

#[derive(Debug, thiserror::Error)]
pub enum BodySerializeError {
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("form bodies must be JSON objects, got {kind}")]
  NotAnObject { kind: &'static str },

  #[error("form field `{name}` nests arrays or objects")]
  NestedField { name: String },
}

/// Turns a structured request body into bytes on the wire.
pub trait BodySerializer: Send + Sync {
  fn serialize(&self, body: &Value) -> Result<SerializedBody, BodySerializeError>;
}

/// Serializes the body with `serde_json`. Relies on the config's default
/// `Content-Type: application/json` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodySerializer;

impl BodySerializer for JsonBodySerializer {
  fn serialize(&self, body: &Value) -> Result<SerializedBody, BodySerializeError> {
    Ok(SerializedBody {
      bytes: Bytes::from(serde_json::to_vec(body)?),
      content_type: None,
    })
  }
}

/// Serializes an object body as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSearchParamsBodySerializer;

impl BodySerializer for UrlSearchParamsBodySerializer {
  fn serialize(&self, body: &Value) -> Result<SerializedBody, BodySerializeError> {
    let Value::Object(entries) = body else {
      return Err(BodySerializeError::NotAnObject { kind: json_kind(body) });
    };

    let mut pairs = Vec::with_capacity(entries.len());
    for (name, value) in entries {
      let values = match value {
        Value::Null => continue,
        Value::Array(items) => items.iter().collect::<Vec<_>>(),
        scalar => vec![scalar],
      };
      for value in values {
        let text = scalar_text(name, value).map_err(|_| BodySerializeError::NestedField { name: name.clone() })?;
        pairs.push(format!("{}={}", form_encode(name), form_encode(&text)));
      }
    }

    Ok(SerializedBody {
      bytes: Bytes::from(pairs.join("&")),
      content_type: Some(HeaderValue::from_static("application/x-www-form-urlencoded")),
    })
  }
}

fn form_encode(text: &str) -> String {
  percent_encoding::utf8_percent_encode(text, COMPONENT_ENCODE_SET)
    .to_string()
    .replace("%20", "+")
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Response payload after the parse stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
  /// 204 responses and `Content-Length: 0`.
  Empty,
  Json(Value),
  Text(String),
  /// Blob, array buffer and form data payloads.
  Bytes(Bytes),
  /// Left unparsed on request.
  Stream(Bytes),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  #[error("JSON deserialization error at path {path}: {inner}")]
  Json { path: String, inner: serde_json::Error },

  #[error(transparent)]
  Value(#[from] ValueError),
}

impl ResponseBody {
  /// Deserializes the parsed body into the caller's type.
  ///
  /// Text bodies deserialize as strings and binary bodies as bytes, so a
  /// `bytes::Bytes` target receives stream payloads verbatim. Targets that
  /// reject raw bytes, such as `serde_json::Value`, receive a sequence of `u8`.
  pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
    match self {
      Self::Json(value) => serde_path_to_error::deserialize(value).map_err(|err| DecodeError::Json {
        path: err.path().to_string(),
        inner: err.into_inner(),
      }),
      Self::Text(text) => {
        let deserializer: StrDeserializer<'_, ValueError> = text.as_str().into_deserializer();
        Ok(T::deserialize(deserializer)?)
      }
      Self::Bytes(bytes) | Self::Stream(bytes) => T::deserialize(BytesDeserializer::<ValueError>::new(bytes))
        .or_else(|_| T::deserialize(SeqDeserializer::<_, ValueError>::new(bytes.iter().copied())))
        .map_err(DecodeError::from),
      Self::Empty => {
        let deserializer: UnitDeserializer<ValueError> = ().into_deserializer();
        Ok(T::deserialize(deserializer)?)
      }
    }
  }
}
