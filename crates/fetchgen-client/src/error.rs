use crate::{body::BodySerializeError, query::QuerySerializeError};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised before a request reaches the transport.
///
/// These reject the in-flight call. Anything that happens after dispatch is
/// reported through [`crate::RequestResult`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
  #[error("failed to serialize operation data: {0}")]
  Data(#[source] serde_json::Error),

  #[error("failed to serialize request body: {0}")]
  Body(#[from] BodySerializeError),

  #[error("failed to serialize request parameters: {0}")]
  Parameters(#[from] QuerySerializeError),

  #[error("invalid header `{name}`: {source}")]
  Header {
    name: String,
    #[source]
    source: http::Error,
  },

  #[error("no request method given and the client config has no default method")]
  MissingMethod,

  #[error("invalid request `{method} {url}`: {source}")]
  Request {
    method: http::Method,
    url: String,
    #[source]
    source: http::Error,
  },
}
