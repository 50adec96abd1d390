use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};

/// Everything but RFC 3986 unreserved characters.
pub const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuerySerializeError {
  #[error("parameter `{name}` nests arrays or objects, which cannot be serialized")]
  Nested { name: String },
}

/// Serializes request query parameters into the search part of a URL.
pub trait QuerySerializer: Send + Sync {
  fn serialize(&self, query: &Map<String, Value>) -> Result<String, QuerySerializeError>;
}

impl<F> QuerySerializer for F
where
  F: Fn(&Map<String, Value>) -> Result<String, QuerySerializeError> + Send + Sync,
{
  fn serialize(&self, query: &Map<String, Value>) -> Result<String, QuerySerializeError> {
    self(query)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum ArrayStyle {
  #[default]
  Form,
  SpaceDelimited,
  PipeDelimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum ObjectStyle {
  Form,
  #[default]
  DeepObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, better_default::Default)]
pub struct ArrayOptions {
  #[default(true)]
  pub explode: bool,
  pub style: ArrayStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, better_default::Default)]
pub struct ObjectOptions {
  #[default(true)]
  pub explode: bool,
  pub style: ObjectStyle,
}

/// The default query serializer.
///
/// Arrays are exploded in form style, objects are exploded in deepObject
/// style, and reserved characters are percent-encoded unless `allow_reserved`
/// is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, bon::Builder)]
pub struct QuerySerializerOptions {
  #[builder(default)]
  pub allow_reserved: bool,
  #[builder(default)]
  pub array: ArrayOptions,
  #[builder(default)]
  pub object: ObjectOptions,
}

impl QuerySerializer for QuerySerializerOptions {
  fn serialize(&self, query: &Map<String, Value>) -> Result<String, QuerySerializeError> {
    let mut search = Vec::with_capacity(query.len());

    for (name, value) in query {
      let serialized = match value {
        Value::Null => continue,
        Value::Array(items) => serialize_array(
          name,
          items,
          Style::from(self.array.style),
          self.array.explode,
          self.allow_reserved,
        )?,
        Value::Object(entries) => serialize_object(
          name,
          entries,
          Style::from(self.object.style),
          self.object.explode,
          self.allow_reserved,
        )?,
        scalar => primitive_param(name, &scalar_text(name, scalar)?, self.allow_reserved),
      };

      if !serialized.is_empty() {
        search.push(serialized);
      }
    }

    Ok(search.join("&"))
  }
}

/// Every OpenAPI parameter style understood by the path and query serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
  Form,
  SpaceDelimited,
  PipeDelimited,
  DeepObject,
  Label,
  Matrix,
  Simple,
}

impl From<ArrayStyle> for Style {
  fn from(style: ArrayStyle) -> Self {
    match style {
      ArrayStyle::Form => Self::Form,
      ArrayStyle::SpaceDelimited => Self::SpaceDelimited,
      ArrayStyle::PipeDelimited => Self::PipeDelimited,
    }
  }
}

impl From<ObjectStyle> for Style {
  fn from(style: ObjectStyle) -> Self {
    match style {
      ObjectStyle::Form => Self::Form,
      ObjectStyle::DeepObject => Self::DeepObject,
    }
  }
}

impl Style {
  fn collapsed_separator(self) -> &'static str {
    match self {
      Self::SpaceDelimited => "%20",
      Self::PipeDelimited => "|",
      _ => ",",
    }
  }

  fn exploded_separator(self) -> &'static str {
    match self {
      Self::Label => ".",
      Self::Matrix => ";",
      Self::Simple => ",",
      _ => "&",
    }
  }
}

pub(crate) fn encode(value: &str, allow_reserved: bool) -> Cow<'_, str> {
  if allow_reserved {
    Cow::Borrowed(value)
  } else {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).into()
  }
}

pub(crate) fn primitive_param(name: &str, value: &str, allow_reserved: bool) -> String {
  format!("{name}={}", encode(value, allow_reserved))
}

pub(crate) fn scalar_text(name: &str, value: &Value) -> Result<String, QuerySerializeError> {
  match value {
    Value::String(s) => Ok(s.clone()),
    Value::Number(n) => Ok(n.to_string()),
    Value::Bool(b) => Ok(b.to_string()),
    Value::Null => Ok(String::new()),
    Value::Array(_) | Value::Object(_) => Err(QuerySerializeError::Nested { name: name.to_string() }),
  }
}

pub(crate) fn serialize_array(
  name: &str,
  items: &[Value],
  style: Style,
  explode: bool,
  allow_reserved: bool,
) -> Result<String, QuerySerializeError> {
  let texts = items
    .iter()
    .map(|item| scalar_text(name, item))
    .collect::<Result<Vec<_>, _>>()?;

  if !explode {
    let joined = texts
      .iter()
      .map(|text| encode(text, allow_reserved))
      .collect::<Vec<_>>()
      .join(style.collapsed_separator());

    return Ok(match style {
      Style::Label => format!(".{joined}"),
      Style::Matrix => format!(";{name}={joined}"),
      Style::Simple => joined,
      _ => format!("{name}={joined}"),
    });
  }

  let separator = style.exploded_separator();
  let joined = texts
    .iter()
    .map(|text| match style {
      Style::Label | Style::Simple => encode(text, allow_reserved).into_owned(),
      _ => primitive_param(name, text, allow_reserved),
    })
    .collect::<Vec<_>>()
    .join(separator);

  Ok(match style {
    Style::Label | Style::Matrix => format!("{separator}{joined}"),
    _ => joined,
  })
}

pub(crate) fn serialize_object(
  name: &str,
  entries: &Map<String, Value>,
  style: Style,
  explode: bool,
  allow_reserved: bool,
) -> Result<String, QuerySerializeError> {
  if style != Style::DeepObject && !explode {
    let mut values = Vec::with_capacity(entries.len() * 2);
    for (key, value) in entries {
      values.push(key.clone());
      values.push(encode(&scalar_text(name, value)?, allow_reserved).into_owned());
    }
    let joined = values.join(",");

    return Ok(match style {
      Style::Form => format!("{name}={joined}"),
      Style::Label => format!(".{joined}"),
      Style::Matrix => format!(";{name}={joined}"),
      _ => joined,
    });
  }

  let separator = style.exploded_separator();
  let mut params = Vec::with_capacity(entries.len());
  for (key, value) in entries {
    let param_name = if style == Style::DeepObject {
      format!("{name}[{key}]")
    } else {
      key.clone()
    };
    params.push(primitive_param(&param_name, &scalar_text(name, value)?, allow_reserved));
  }
  let joined = params.join(separator);

  Ok(match style {
    Style::Label | Style::Matrix => format!("{separator}{joined}"),
    _ => joined,
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn query(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      _ => unreachable!("test query must be an object"),
    }
  }

  #[test]
  fn test_default_serializer() {
    let cases = [
      (json!({"q": "hello world"}), "q=hello%20world"),
      (json!({"limit": 10, "active": true}), "limit=10&active=true"),
      (json!({"tags": ["a", "b"]}), "tags=a&tags=b"),
      (json!({"filter": {"name": "rex", "age": 3}}), "filter[name]=rex&filter[age]=3"),
      (json!({"skip": null, "page": 2}), "page=2"),
      (json!({"email": "a+b@example.com"}), "email=a%2Bb%40example.com"),
      (json!({}), ""),
    ];

    for (input, expected) in cases {
      let result = QuerySerializerOptions::default().serialize(&query(input.clone())).unwrap();
      assert_eq!(result, expected, "serializing {input}");
    }
  }

  #[test]
  fn test_array_styles_without_explode() {
    let cases = [
      (ArrayStyle::Form, "ids=1,2,3"),
      (ArrayStyle::SpaceDelimited, "ids=1%202%203"),
      (ArrayStyle::PipeDelimited, "ids=1|2|3"),
    ];

    for (style, expected) in cases {
      let serializer = QuerySerializerOptions::builder()
        .array(ArrayOptions { explode: false, style })
        .build();
      let result = serializer.serialize(&query(json!({"ids": [1, 2, 3]}))).unwrap();
      assert_eq!(result, expected, "style {style}");
    }
  }

  #[test]
  fn test_object_form_without_explode() {
    let serializer = QuerySerializerOptions::builder()
      .object(ObjectOptions {
        explode: false,
        style: ObjectStyle::Form,
      })
      .build();
    let result = serializer.serialize(&query(json!({"color": {"r": 100, "g": 200}}))).unwrap();

    assert_eq!(result, "color=r,100,g,200");
  }

  #[test]
  fn test_object_form_with_explode_uses_keys() {
    let serializer = QuerySerializerOptions::builder()
      .object(ObjectOptions {
        explode: true,
        style: ObjectStyle::Form,
      })
      .build();
    let result = serializer.serialize(&query(json!({"color": {"r": 100, "g": 200}}))).unwrap();

    assert_eq!(result, "r=100&g=200");
  }

  #[test]
  fn test_allow_reserved_skips_encoding() {
    let serializer = QuerySerializerOptions::builder().allow_reserved(true).build();
    let result = serializer.serialize(&query(json!({"path": "a/b?c"}))).unwrap();

    assert_eq!(result, "path=a/b?c");
  }

  #[test]
  fn test_nested_values_are_rejected() {
    let err = QuerySerializerOptions::default()
      .serialize(&query(json!({"deep": [[1, 2]]})))
      .unwrap_err();

    assert_eq!(err, QuerySerializeError::Nested { name: "deep".to_string() });
  }

  #[test]
  fn test_closure_serializer() {
    let serializer = |q: &Map<String, Value>| Ok::<_, QuerySerializeError>(format!("count={}", q.len()));
    let result = QuerySerializer::serialize(&serializer, &query(json!({"a": 1, "b": 2}))).unwrap();

    assert_eq!(result, "count=2");
  }
}
