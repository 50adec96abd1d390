use std::{fmt, sync::Arc};

use http::Method;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
  body::{BodySerializer, RequestBody},
  client::Client,
  config::{ParseAs, ResponseTransformer},
  error::ClientError,
  headers::HeaderInput,
  query::QuerySerializer,
  transport::Transport,
};

/// Per-call settings. Every `Option` left unset falls back to the client config.
#[derive(Clone, Default, bon::Builder)]
#[builder(on(String, into))]
pub struct RequestOptions {
  /// Endpoint path, relative to the base URL, with `{param}` templates.
  pub url: String,
  pub base_url: Option<String>,
  /// Merged over the config headers name by name.
  #[builder(default)]
  pub headers: IndexMap<String, HeaderInput>,
  pub method: Option<Method>,
  #[builder(into)]
  pub body: Option<RequestBody>,
  pub body_serializer: Option<Arc<dyn BodySerializer>>,
  pub query_serializer: Option<Arc<dyn QuerySerializer>>,
  pub response_transformer: Option<ResponseTransformer>,
  pub fetch: Option<Arc<dyn Transport>>,
  pub parse_as: Option<ParseAs>,
  #[builder(default)]
  pub path: Map<String, Value>,
  #[builder(default)]
  pub query: Map<String, Value>,
}

impl fmt::Debug for RequestOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RequestOptions")
      .field("url", &self.url)
      .field("base_url", &self.base_url)
      .field("headers", &self.headers)
      .field("method", &self.method)
      .field("body", &self.body)
      .field("parse_as", &self.parse_as)
      .field("path", &self.path)
      .field("query", &self.query)
      .finish_non_exhaustive()
  }
}

/// What an operation's data type declares about itself.
pub trait Shape {
  const DECLARES_BODY: bool;
  const DECLARES_HEADERS: bool;
}

/// Declares neither a body nor headers.
#[derive(Debug)]
pub enum Plain {}

#[derive(Debug)]
pub enum WithBody {}

#[derive(Debug)]
pub enum WithHeaders {}

#[derive(Debug)]
pub enum WithBodyAndHeaders {}

impl Shape for Plain {
  const DECLARES_BODY: bool = false;
  const DECLARES_HEADERS: bool = false;
}

impl Shape for WithBody {
  const DECLARES_BODY: bool = true;
  const DECLARES_HEADERS: bool = false;
}

impl Shape for WithHeaders {
  const DECLARES_BODY: bool = false;
  const DECLARES_HEADERS: bool = true;
}

impl Shape for WithBodyAndHeaders {
  const DECLARES_BODY: bool = true;
  const DECLARES_HEADERS: bool = true;
}

/// Shapes that leave the request body to the caller.
pub trait AcceptsBody: Shape {}
impl AcceptsBody for Plain {}
impl AcceptsBody for WithHeaders {}

/// Shapes that leave request headers to the caller.
pub trait AcceptsHeaders: Shape {}
impl AcceptsHeaders for Plain {}
impl AcceptsHeaders for WithBody {}

/// Only operations without declared body or headers keep the response transformer.
pub trait AcceptsResponseTransformer: Shape {}
impl AcceptsResponseTransformer for Plain {}

/// Parameters an operation sends, split by where they go on the wire.
#[derive(Debug, Clone, Default)]
pub struct DataParts {
  pub path: Map<String, Value>,
  pub query: Map<String, Value>,
  pub body: Option<RequestBody>,
  pub headers: IndexMap<String, HeaderInput>,
}

/// Implemented by the generated data type of each operation.
pub trait OperationData {
  type Shape: Shape;

  fn into_parts(self) -> Result<DataParts, serde_json::Error>;
}

impl OperationData for () {
  type Shape = Plain;

  fn into_parts(self) -> Result<DataParts, serde_json::Error> {
    Ok(DataParts::default())
  }
}

/// Serializes a parameter group into a name/value map. `null` yields an empty map.
pub fn to_parameter_map<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    Value::Null => Ok(Map::new()),
    other => Err(serde::ser::Error::custom(format!(
      "parameters must serialize to an object, got `{other}`"
    ))),
  }
}

/// Options of a generated operation function.
///
/// Which base setters exist depends on `T::Shape`: `body` disappears once the
/// operation declares a body, `header`/`headers` once it declares headers, and
/// `response_transformer` as soon as it declares either.
///
/// ```compile_fail
/// use fetchgen_client::{DataParts, Options, OperationData, WithBody};
///
/// struct CreatePet;
///
/// impl OperationData for CreatePet {
///   type Shape = WithBody;
///
///   fn into_parts(self) -> Result<DataParts, serde_json::Error> {
///     Ok(DataParts::default())
///   }
/// }
///
/// let _ = Options::new(CreatePet).body("{}");
/// ```
pub struct Options<T: OperationData> {
  data: T,
  base: RequestOptions,
  client: Option<Client>,
}

impl<T: OperationData + fmt::Debug> fmt::Debug for Options<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Options")
      .field("data", &self.data)
      .field("base", &self.base)
      .field("client", &self.client.is_some())
      .finish()
  }
}

impl<T: OperationData + Default> Default for Options<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T: OperationData> From<T> for Options<T> {
  fn from(data: T) -> Self {
    Self::new(data)
  }
}

impl<T: OperationData> Options<T> {
  pub fn new(data: T) -> Self {
    Self {
      data,
      base: RequestOptions::default(),
      client: None,
    }
  }

  #[must_use]
  pub fn data(&self) -> &T {
    &self.data
  }

  /// Sends through `client` instead of the process-wide default client.
  #[must_use]
  pub fn client(mut self, client: Client) -> Self {
    self.client = Some(client);
    self
  }

  #[must_use]
  pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base.base_url = Some(base_url.into());
    self
  }

  #[must_use]
  pub fn parse_as(mut self, parse_as: ParseAs) -> Self {
    self.base.parse_as = Some(parse_as);
    self
  }

  #[must_use]
  pub fn body_serializer(mut self, serializer: Arc<dyn BodySerializer>) -> Self {
    self.base.body_serializer = Some(serializer);
    self
  }

  #[must_use]
  pub fn query_serializer(mut self, serializer: Arc<dyn QuerySerializer>) -> Self {
    self.base.query_serializer = Some(serializer);
    self
  }

  #[must_use]
  pub fn fetch(mut self, transport: Arc<dyn Transport>) -> Self {
    self.base.fetch = Some(transport);
    self
  }

  /// Merges the operation data into the base options for `url`.
  pub(crate) fn into_request_options(self, url: &str) -> Result<(Option<Client>, RequestOptions), ClientError> {
    let Self { data, mut base, client } = self;
    let parts = data.into_parts().map_err(ClientError::Data)?;

    base.url = url.to_string();
    base.path.extend(parts.path);
    base.query.extend(parts.query);

    if <T::Shape as Shape>::DECLARES_BODY {
      base.body = parts.body;
      base.response_transformer = None;
    }
    if <T::Shape as Shape>::DECLARES_HEADERS {
      base.headers = parts.headers;
      base.response_transformer = None;
    }

    Ok((client, base))
  }
}

impl<T> Options<T>
where
  T: OperationData,
  T::Shape: AcceptsBody,
{
  #[must_use]
  pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
    self.base.body = Some(body.into());
    self
  }
}

impl<T> Options<T>
where
  T: OperationData,
  T::Shape: AcceptsHeaders,
{
  #[must_use]
  pub fn header(mut self, name: impl Into<String>, value: impl Into<HeaderInput>) -> Self {
    self.base.headers.insert(name.into(), value.into());
    self
  }

  #[must_use]
  pub fn headers(mut self, headers: IndexMap<String, HeaderInput>) -> Self {
    self.base.headers = headers;
    self
  }
}

impl<T> Options<T>
where
  T: OperationData,
  T::Shape: AcceptsResponseTransformer,
{
  #[must_use]
  pub fn response_transformer(mut self, transformer: ResponseTransformer) -> Self {
    self.base.response_transformer = Some(transformer);
    self
  }
}
