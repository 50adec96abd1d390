use std::{
  fmt,
  sync::{Arc, LazyLock, PoisonError, RwLock},
};

use futures::future::BoxFuture;
use http::{HeaderMap, HeaderValue, Method, header::CONTENT_TYPE};
use mediatype::{
  MediaType,
  names::{APPLICATION, AUDIO, FORM_DATA, IMAGE, JSON, MULTIPART, TEXT, VIDEO},
};
use serde_json::Value;

use crate::{
  body::{BodySerializer, JsonBodySerializer, RequestBody},
  error::BoxError,
  query::{QuerySerializer, QuerySerializerOptions},
  transport::Transport,
};

/// Post-processes successfully parsed JSON data before it is decoded.
pub type ResponseTransformer = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync>;

/// How a successful response body is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ParseAs {
  /// Inferred from the `Content-Type` response header.
  #[default]
  Auto,
  ArrayBuffer,
  Blob,
  FormData,
  Json,
  Text,
  /// Body is handed over without parsing.
  Stream,
}

impl ParseAs {
  /// Maps a `Content-Type` header to a parse method, `None` when unknown.
  #[must_use]
  pub fn from_content_type(content_type: &str) -> Option<Self> {
    let media = MediaType::parse(content_type).ok()?;

    if (media.ty == APPLICATION && media.subty == JSON) || media.suffix.is_some_and(|suffix| suffix == JSON) {
      return Some(Self::Json);
    }
    if media.ty == MULTIPART && media.subty == FORM_DATA {
      return Some(Self::FormData);
    }
    if [APPLICATION, AUDIO, IMAGE, VIDEO].iter().any(|ty| *ty == media.ty) {
      return Some(Self::Blob);
    }
    if media.ty == TEXT {
      return Some(Self::Text);
    }
    None
  }

  /// Resolves `Auto` against the response headers, falling back to JSON.
  #[must_use]
  pub fn resolve(self, headers: &HeaderMap) -> Self {
    match self {
      Self::Auto => headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(Self::from_content_type)
        .unwrap_or(Self::Json),
      explicit => explicit,
    }
  }
}

pub(crate) fn default_headers() -> HeaderMap {
  let mut headers = HeaderMap::new();
  headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
  headers
}

fn default_body_serializer() -> Arc<dyn BodySerializer> {
  Arc::new(JsonBodySerializer)
}

fn default_query_serializer() -> Arc<dyn QuerySerializer> {
  Arc::new(QuerySerializerOptions::default())
}

/// Client-wide settings every request starts from.
#[derive(Clone, better_default::Default, bon::Builder)]
#[builder(on(String, into))]
pub struct Config {
  /// Prefix for every request URL. A trailing `/` is dropped.
  #[builder(default)]
  pub base_url: String,
  #[builder(default = default_headers())]
  #[default(default_headers())]
  pub headers: HeaderMap,
  /// Used by `Client::request` when the options carry no method.
  pub method: Option<Method>,
  pub body: Option<RequestBody>,
  #[builder(default = default_body_serializer())]
  #[default(default_body_serializer())]
  pub body_serializer: Arc<dyn BodySerializer>,
  #[builder(default = default_query_serializer())]
  #[default(default_query_serializer())]
  pub query_serializer: Arc<dyn QuerySerializer>,
  pub response_transformer: Option<ResponseTransformer>,
  /// Transport override; the `reqwest` transport is used when unset.
  pub fetch: Option<Arc<dyn Transport>>,
  #[builder(default)]
  pub parse_as: ParseAs,
  /// Whether this config becomes the process-wide one.
  #[builder(default = true)]
  #[default(true)]
  pub global: bool,
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("base_url", &self.base_url)
      .field("headers", &self.headers)
      .field("method", &self.method)
      .field("body", &self.body)
      .field("response_transformer", &self.response_transformer.is_some())
      .field("fetch", &self.fetch.is_some())
      .field("parse_as", &self.parse_as)
      .field("global", &self.global)
      .finish_non_exhaustive()
  }
}

static GLOBAL_CONFIG: LazyLock<RwLock<Arc<Config>>> = LazyLock::new(|| RwLock::new(Arc::new(Config::default())));

/// Snapshot of the process-wide config.
#[must_use]
pub fn global_config() -> Arc<Config> {
  GLOBAL_CONFIG.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replaces the process-wide config. In-flight requests keep the snapshot they started with.
pub fn set_global_config(config: Config) -> Arc<Config> {
  let config = Arc::new(config);
  *GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&config);
  config
}

/// Where a client reads its config from.
pub(crate) enum ConfigScope {
  Global,
  Local(RwLock<Arc<Config>>),
}

impl ConfigScope {
  pub(crate) fn snapshot(&self) -> Arc<Config> {
    match self {
      Self::Global => global_config(),
      Self::Local(cell) => cell.read().unwrap_or_else(PoisonError::into_inner).clone(),
    }
  }

  /// Applies `update` to a detached copy of the current config and swaps it in whole.
  ///
  /// No lock is held while `update` runs, so it may read the config again.
  /// Concurrent updates are last-writer-wins.
  pub(crate) fn update(&self, update: impl FnOnce(&mut Config)) -> Arc<Config> {
    let cell = match self {
      Self::Global => &*GLOBAL_CONFIG,
      Self::Local(cell) => cell,
    };
    let mut next = Config::clone(&self.snapshot());
    update(&mut next);
    next.base_url = trim_base_url(next.base_url);
    let next = Arc::new(next);
    *cell.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
    next
  }
}

pub(crate) fn trim_base_url(mut base_url: String) -> String {
  if base_url.ends_with('/') {
    base_url.pop();
  }
  base_url
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_defaults() {
    let config = Config::default();

    assert!(config.global);
    assert_eq!(config.parse_as, ParseAs::Auto);
    assert_eq!(config.base_url, "");
    assert_eq!(config.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(config.fetch.is_none());
  }

  #[test]
  fn test_builder_matches_defaults() {
    let config = Config::builder().base_url("https://api.test").global(false).build();

    assert!(!config.global);
    assert_eq!(config.base_url, "https://api.test");
    assert_eq!(config.parse_as, ParseAs::Auto);
    assert_eq!(config.headers.get(CONTENT_TYPE).unwrap(), "application/json");
  }

  #[test]
  fn test_parse_as_from_content_type() {
    let cases = [
      ("application/json", Some(ParseAs::Json)),
      ("application/json; charset=utf-8", Some(ParseAs::Json)),
      ("application/problem+json", Some(ParseAs::Json)),
      ("multipart/form-data; boundary=x", Some(ParseAs::FormData)),
      ("application/octet-stream", Some(ParseAs::Blob)),
      ("image/png", Some(ParseAs::Blob)),
      ("text/plain", Some(ParseAs::Text)),
      ("font/woff2", None),
      ("not a media type", None),
    ];

    for (content_type, expected) in cases {
      assert_eq!(ParseAs::from_content_type(content_type), expected, "content type {content_type}");
    }
  }

  #[test]
  fn test_parse_as_resolve() {
    let mut headers = HeaderMap::new();
    assert_eq!(ParseAs::Auto.resolve(&headers), ParseAs::Json);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
    assert_eq!(ParseAs::Auto.resolve(&headers), ParseAs::Text);
    assert_eq!(ParseAs::Stream.resolve(&headers), ParseAs::Stream);
  }

  #[test]
  fn test_parse_as_names() {
    assert_eq!(ParseAs::ArrayBuffer.to_string(), "arrayBuffer");
    assert_eq!("formData".parse::<ParseAs>().unwrap(), ParseAs::FormData);
  }

  #[test]
  fn test_local_scope_update_is_isolated() {
    let scope = ConfigScope::Local(RwLock::new(Arc::new(Config::builder().global(false).build())));
    let before = scope.snapshot();

    let after = scope.update(|config| config.base_url = "https://local.test/".to_string());

    assert_eq!(before.base_url, "");
    assert_eq!(after.base_url, "https://local.test");
    assert!(Arc::ptr_eq(&after, &scope.snapshot()));
  }

  #[test]
  fn test_update_may_read_current_config() {
    let scope = ConfigScope::Local(RwLock::new(Arc::new(
      Config::builder().base_url("https://local.test").global(false).build(),
    )));

    let after = scope.update(|config| config.base_url = format!("{}/v2", scope.snapshot().base_url));

    assert_eq!(after.base_url, "https://local.test/v2");
  }
}
