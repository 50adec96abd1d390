use serde_json::{Map, Value};

use crate::query::{
  QuerySerializeError, QuerySerializer, Style, encode, primitive_param, scalar_text, serialize_array, serialize_object,
};

/// Joins `base_url` and `url`, substitutes path parameters and appends the
/// serialized query.
pub fn build_url(
  base_url: &str,
  url: &str,
  path: &Map<String, Value>,
  query: &Map<String, Value>,
  query_serializer: &dyn QuerySerializer,
) -> Result<String, QuerySerializeError> {
  let mut full = String::with_capacity(base_url.len() + url.len());
  full.push_str(base_url);
  if !url.starts_with('/') {
    full.push('/');
  }
  full.push_str(url);

  if !path.is_empty() {
    full = substitute_path(&full, path)?;
  }

  if !query.is_empty() {
    let search = query_serializer.serialize(query)?;
    let search = search.strip_prefix('?').unwrap_or(&search);
    if !search.is_empty() {
      full.push('?');
      full.push_str(search);
    }
  }

  Ok(full)
}

/// Replaces `{name}` templates in `url`.
///
/// `{.name}` selects label style, `{;name}` matrix style, anything else simple
/// style; a trailing `*` explodes arrays and objects. Templates without a
/// value are left untouched.
pub fn substitute_path(url: &str, path: &Map<String, Value>) -> Result<String, QuerySerializeError> {
  let mut result = String::with_capacity(url.len());
  let mut rest = url;

  while let Some(open) = rest.find('{') {
    let Some(close) = rest[open + 1..].find(['{', '}']).map(|offset| open + 1 + offset) else {
      break;
    };
    result.push_str(&rest[..open]);

    if rest.as_bytes()[close] == b'{' || close == open + 1 {
      result.push_str(&rest[open..close]);
      rest = &rest[close..];
      continue;
    }

    let template = &rest[open..=close];
    let replacement = expand_template(&rest[open + 1..close], path)?;
    result.push_str(replacement.as_deref().unwrap_or(template));
    rest = &rest[close + 1..];
  }

  result.push_str(rest);
  Ok(result)
}

fn expand_template(inner: &str, path: &Map<String, Value>) -> Result<Option<String>, QuerySerializeError> {
  let (inner, explode) = match inner.strip_suffix('*') {
    Some(stripped) => (stripped, true),
    None => (inner, false),
  };
  let (name, style) = if let Some(name) = inner.strip_prefix('.') {
    (name, Style::Label)
  } else if let Some(name) = inner.strip_prefix(';') {
    (name, Style::Matrix)
  } else {
    (inner, Style::Simple)
  };

  let replacement = match path.get(name) {
    None | Some(Value::Null) => return Ok(None),
    Some(Value::Array(items)) => serialize_array(name, items, style, explode, false)?,
    Some(Value::Object(entries)) => serialize_object(name, entries, style, explode, false)?,
    Some(scalar) => {
      let text = scalar_text(name, scalar)?;
      match style {
        Style::Matrix => format!(";{}", primitive_param(name, &text, false)),
        Style::Label => encode(&format!(".{text}"), false).into_owned(),
        _ => encode(&text, false).into_owned(),
      }
    }
  };

  Ok(Some(replacement))
}
