use std::future::Future;

use bytes::Bytes;
use futures::future::BoxFuture;

pub type HttpRequest = http::Request<Bytes>;
pub type HttpResponse = http::Response<Bytes>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  #[cfg(feature = "reqwest")]
  #[error(transparent)]
  Reqwest(#[from] reqwest::Error),

  #[error("no transport configured; enable the `reqwest` feature or set `Config::fetch`")]
  Unavailable,

  #[error("{message}")]
  Failed { message: String },
}

impl TransportError {
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed {
      message: message.into(),
    }
  }
}

/// Issues a finalized request and resolves with the raw response.
///
/// Cancellation is whatever the implementation supports natively: dropping the
/// returned future abandons the request.
pub trait Transport: Send + Sync {
  fn send(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>>;
}

impl<F, Fut> Transport for F
where
  F: Fn(HttpRequest) -> Fut + Send + Sync,
  Fut: Future<Output = Result<HttpResponse, TransportError>> + Send + 'static,
{
  fn send(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
    Box::pin(self(request))
  }
}

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
  use futures::future::BoxFuture;

  use super::{HttpRequest, HttpResponse, Transport, TransportError};

  /// Default transport backed by a shared `reqwest::Client`.
  #[derive(Debug, Clone, Default)]
  pub struct ReqwestTransport {
    client: reqwest::Client,
  }

  impl ReqwestTransport {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
      Self { client }
    }
  }

  impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
      let client = self.client.clone();
      Box::pin(async move {
        let request = reqwest::Request::try_from(request)?;
        let response = client.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut converted = http::Response::new(body);
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;
        Ok(converted)
      })
    }
  }
}

/// Duplicates a request; `http::Request` is not `Clone`. Extensions are not carried over.
pub(crate) fn duplicate_request(request: &HttpRequest) -> HttpRequest {
  let mut copy = http::Request::new(request.body().clone());
  *copy.method_mut() = request.method().clone();
  *copy.uri_mut() = request.uri().clone();
  *copy.version_mut() = request.version();
  *copy.headers_mut() = request.headers().clone();
  copy
}
