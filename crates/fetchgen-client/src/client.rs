use std::sync::{Arc, LazyLock, RwLock};

use bytes::Bytes;
use http::{
  HeaderMap, Method, StatusCode,
  header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tracing::{Span, debug, field::Empty, instrument, warn};

use crate::{
  body::{DecodeError, RequestBody, ResponseBody},
  config::{Config, ConfigScope, ParseAs, ResponseTransformer, set_global_config, trim_base_url},
  error::ClientError,
  headers::merge_headers,
  interceptors::Interceptors,
  options::RequestOptions,
  result::{Outcome, RequestResult, ResponseError},
  transport::{HttpRequest, HttpResponse, Transport, TransportError, duplicate_request},
  url::build_url,
};

#[cfg(feature = "reqwest")]
static DEFAULT_TRANSPORT: LazyLock<Arc<dyn Transport>> =
  LazyLock::new(|| Arc::new(crate::transport::ReqwestTransport::default()));

static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(|| Client::with_scope(ConfigScope::Global));

struct ClientInner {
  config: ConfigScope,
  interceptors: Interceptors,
}

/// HTTP client every generated operation sends through.
///
/// Cloning is cheap and clones share config and interceptors.
#[derive(Clone)]
pub struct Client {
  inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Client {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Client")
      .field("global", &self.is_global())
      .field("config", &self.get_config())
      .field("interceptors", &self.inner.interceptors)
      .finish()
  }
}

/// Everything the pipeline needs once options and config are merged.
struct Prepared {
  request: HttpRequest,
  fetch: Option<Arc<dyn Transport>>,
  parse_as: ParseAs,
  response_transformer: Option<ResponseTransformer>,
}

macro_rules! verb_methods {
  ($($name:ident => $method:ident),* $(,)?) => {
    $(
      #[doc = concat!("Sends `options` as a `", stringify!($method), "` request.")]
      pub async fn $name<D, E>(&self, mut options: RequestOptions) -> Result<RequestResult<D, E>, ClientError>
      where
        D: DeserializeOwned + Send,
        E: DeserializeOwned + Send,
      {
        options.method = Some(Method::$method);
        self.request(options).await
      }
    )*
  };
}

impl Client {
  /// Creates a client. With `config.global` set the config also replaces the
  /// process-wide one, and the client keeps following it.
  #[must_use]
  pub fn new(mut config: Config) -> Self {
    config.base_url = trim_base_url(config.base_url);
    if config.global {
      set_global_config(config);
      Self::with_scope(ConfigScope::Global)
    } else {
      Self::with_scope(ConfigScope::Local(RwLock::new(Arc::new(config))))
    }
  }

  /// The default client, bound to the process-wide config.
  #[must_use]
  pub fn global() -> Self {
    DEFAULT_CLIENT.clone()
  }

  fn with_scope(config: ConfigScope) -> Self {
    Self {
      inner: Arc::new(ClientInner {
        config,
        interceptors: Interceptors::default(),
      }),
    }
  }

  #[must_use]
  pub fn is_global(&self) -> bool {
    matches!(self.inner.config, ConfigScope::Global)
  }

  /// Snapshot of the active config.
  #[must_use]
  pub fn get_config(&self) -> Arc<Config> {
    self.inner.config.snapshot()
  }

  /// Applies `update` to a copy of the active config and returns the result.
  /// Requests already past the configure stage keep their snapshot.
  ///
  /// `update` runs without holding the config lock, so it may call
  /// [`Client::get_config`]. Concurrent calls are last-writer-wins.
  pub fn set_config(&self, update: impl FnOnce(&mut Config)) -> Arc<Config> {
    self.inner.config.update(update)
  }

  #[must_use]
  pub fn interceptors(&self) -> &Interceptors {
    &self.inner.interceptors
  }

  verb_methods! {
    connect => CONNECT,
    delete => DELETE,
    get => GET,
    head => HEAD,
    options => OPTIONS,
    patch => PATCH,
    post => POST,
    put => PUT,
    trace => TRACE,
  }

  /// Runs one request through configure, serialize, dispatch and parse.
  ///
  /// The method comes from `options`, falling back to the config's method.
  ///
  /// ## Errors
  ///
  /// Returns `Err` only when the request cannot be built. Transport failures
  /// and non-success responses resolve to the error branch of the result.
  #[instrument(
    name = "fetchgen_request",
    skip_all,
    fields(http.method = Empty, http.url = Empty, http.status_code = Empty)
  )]
  pub async fn request<D, E>(&self, options: RequestOptions) -> Result<RequestResult<D, E>, ClientError>
  where
    D: DeserializeOwned + Send,
    E: DeserializeOwned + Send,
  {
    let config = self.get_config();
    let prepared = prepare(&config, options)?;
    drop(config);

    let mut request = prepared.request;
    for handler in self.inner.interceptors.request.snapshot() {
      request = handler(request);
    }
    Span::current().record("http.method", request.method().as_str());
    Span::current().record("http.url", request.uri().to_string().as_str());

    let Some(transport) = prepared.fetch else {
      warn!("no transport available");
      return Ok(RequestResult {
        outcome: Outcome::Error(TransportError::Unavailable.into()),
        request,
        response: None,
      });
    };

    let mut response = match transport.send(duplicate_request(&request)).await {
      Ok(response) => response,
      Err(err) => {
        warn!(error = %err, "transport failed");
        return Ok(RequestResult {
          outcome: Outcome::Error(err.into()),
          request,
          response: None,
        });
      }
    };

    for handler in self.inner.interceptors.response.snapshot() {
      response = handler(response, &request);
    }

    let status = response.status();
    Span::current().record("http.status_code", status.as_u16());
    debug!(%status, "response received");

    let outcome = if status.is_success() {
      read_data(&response, prepared.parse_as, prepared.response_transformer).await
    } else {
      Outcome::Error(self.read_error(&response, &request))
    };

    Ok(RequestResult {
      outcome,
      request,
      response: Some(response),
    })
  }

  fn read_error<E: DeserializeOwned>(&self, response: &HttpResponse, request: &HttpRequest) -> ResponseError<E> {
    let status = response.status();
    let text = String::from_utf8_lossy(response.body());
    let mut body = if text.is_empty() {
      ResponseBody::Empty
    } else {
      serde_json::from_str(&text).map_or_else(|_| ResponseBody::Text(text.into_owned()), ResponseBody::Json)
    };

    for handler in self.inner.interceptors.error.snapshot() {
      body = handler(body, response, request);
    }

    match body.decode::<E>() {
      Ok(error) => ResponseError::Api { status, error },
      Err(source) => ResponseError::Undecodable { status, body, source },
    }
  }
}

/// Merges per-call options over `config` and builds the request to dispatch.
fn prepare(config: &Config, options: RequestOptions) -> Result<Prepared, ClientError> {
  let RequestOptions {
    url,
    base_url,
    headers,
    method,
    body,
    body_serializer,
    query_serializer,
    response_transformer,
    fetch,
    parse_as,
    path,
    query,
  } = options;

  let method = method.or_else(|| config.method.clone()).ok_or(ClientError::MissingMethod)?;
  let base_url = base_url.map_or_else(|| config.base_url.clone(), trim_base_url);
  let mut headers = merge_headers(&config.headers, &headers)?;

  let body = body
    .or_else(|| config.body.clone())
    .filter(|body| !matches!(body, RequestBody::Text(text) if text.is_empty()));
  let payload = match body {
    None => {
      headers.remove(CONTENT_TYPE);
      Bytes::new()
    }
    Some(RequestBody::Json(value)) => {
      let serializer = body_serializer.as_ref().unwrap_or(&config.body_serializer);
      let serialized = serializer.serialize(&value)?;
      if let Some(content_type) = serialized.content_type {
        headers.insert(CONTENT_TYPE, content_type);
      }
      serialized.bytes
    }
    Some(RequestBody::Text(text)) => Bytes::from(text),
    Some(RequestBody::Raw(bytes)) => bytes,
  };

  let query_serializer = query_serializer.as_ref().unwrap_or(&config.query_serializer);
  let url = build_url(&base_url, &url, &path, &query, query_serializer.as_ref())?;
  debug!(%method, %url, "request configured");

  let mut request = http::Request::builder()
    .method(method.clone())
    .uri(url.as_str())
    .body(payload)
    .map_err(|source| ClientError::Request { method, url, source })?;
  *request.headers_mut() = headers;

  Ok(Prepared {
    request,
    fetch: fetch.or_else(|| config.fetch.clone()).or_else(default_transport),
    parse_as: parse_as.unwrap_or(config.parse_as),
    response_transformer: response_transformer.or_else(|| config.response_transformer.clone()),
  })
}

#[cfg(feature = "reqwest")]
fn default_transport() -> Option<Arc<dyn Transport>> {
  Some(Arc::clone(&DEFAULT_TRANSPORT))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport() -> Option<Arc<dyn Transport>> {
  None
}

fn is_empty_body(status: StatusCode, headers: &HeaderMap) -> bool {
  status == StatusCode::NO_CONTENT || headers.get(CONTENT_LENGTH).is_some_and(|length| length == "0")
}

async fn read_data<D, E>(
  response: &HttpResponse,
  parse_as: ParseAs,
  transformer: Option<ResponseTransformer>,
) -> Outcome<D, ResponseError<E>>
where
  D: DeserializeOwned,
{
  let status = response.status();
  let raw = response.body();

  let body = if is_empty_body(status, response.headers()) {
    ResponseBody::Empty
  } else {
    match parse_as.resolve(response.headers()) {
      ParseAs::Stream => ResponseBody::Stream(raw.clone()),
      ParseAs::Text => ResponseBody::Text(String::from_utf8_lossy(raw).into_owned()),
      ParseAs::ArrayBuffer | ParseAs::Blob | ParseAs::FormData => ResponseBody::Bytes(raw.clone()),
      ParseAs::Json | ParseAs::Auto => match serde_json::from_slice(raw) {
        Ok(value) => ResponseBody::Json(value),
        Err(inner) => {
          return Outcome::Error(ResponseError::Undecodable {
            status,
            body: ResponseBody::Bytes(raw.clone()),
            source: DecodeError::Json {
              path: ".".to_string(),
              inner,
            },
          });
        }
      },
    }
  };

  let body = match (body, transformer) {
    (ResponseBody::Json(value), Some(transformer)) => match transformer(value).await {
      Ok(value) => ResponseBody::Json(value),
      Err(err) => return Outcome::Error(ResponseError::Transform(err)),
    },
    (body, _) => body,
  };

  match body.decode::<D>() {
    Ok(data) => Outcome::Data(data),
    Err(source) => Outcome::Error(ResponseError::Undecodable { status, body, source }),
  }
}
