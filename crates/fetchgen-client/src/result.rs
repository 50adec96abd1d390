use http::StatusCode;

use crate::{
  body::{DecodeError, ResponseBody},
  error::BoxError,
  transport::{HttpRequest, HttpResponse, TransportError},
};

/// Why a dispatched request did not produce data.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError<E> {
  /// Non-success status with a payload that decoded into the caller's error type.
  #[error("request failed with status {status}")]
  Api { status: StatusCode, error: E },

  /// The payload could not be decoded into the expected type.
  #[error("response with status {status} could not be decoded: {source}")]
  Undecodable {
    status: StatusCode,
    body: ResponseBody,
    #[source]
    source: DecodeError,
  },

  #[error("response transformer failed: {0}")]
  Transform(#[source] BoxError),

  #[error(transparent)]
  Transport(#[from] TransportError),
}

impl<E> ResponseError<E> {
  /// Status of the response, `None` when no response was received.
  #[must_use]
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Api { status, .. } | Self::Undecodable { status, .. } => Some(*status),
      Self::Transform(_) | Self::Transport(_) => None,
    }
  }
}

/// Exactly one of data or error.
#[derive(Debug)]
pub enum Outcome<D, E> {
  Data(D),
  Error(E),
}

/// What a request resolves with once it reached the transport.
#[derive(Debug)]
pub struct RequestResult<D, E> {
  pub outcome: Outcome<D, ResponseError<E>>,
  /// The request as dispatched, after request interceptors.
  pub request: HttpRequest,
  /// `None` only when the transport failed before any response existed.
  pub response: Option<HttpResponse>,
}

impl<D, E> RequestResult<D, E> {
  #[must_use]
  pub fn data(&self) -> Option<&D> {
    match &self.outcome {
      Outcome::Data(data) => Some(data),
      Outcome::Error(_) => None,
    }
  }

  #[must_use]
  pub fn error(&self) -> Option<&ResponseError<E>> {
    match &self.outcome {
      Outcome::Data(_) => None,
      Outcome::Error(error) => Some(error),
    }
  }

  #[must_use]
  pub fn is_data(&self) -> bool {
    matches!(self.outcome, Outcome::Data(_))
  }

  /// Drops the request/response pair and keeps the outcome.
  pub fn into_result(self) -> Result<D, ResponseError<E>> {
    match self.outcome {
      Outcome::Data(data) => Ok(data),
      Outcome::Error(error) => Err(error),
    }
  }
}

#[cfg(test)]
mod tests {
  use bytes::Bytes;

  use super::*;

  fn request() -> HttpRequest {
    http::Request::new(Bytes::new())
  }

  #[test]
  fn test_data_branch() {
    let result: RequestResult<i32, String> = RequestResult {
      outcome: Outcome::Data(7),
      request: request(),
      response: Some(http::Response::new(Bytes::new())),
    };

    assert!(result.is_data());
    assert_eq!(result.data(), Some(&7));
    assert!(result.error().is_none());
    assert_eq!(result.into_result().unwrap(), 7);
  }

  #[test]
  fn test_error_branch() {
    let result: RequestResult<i32, String> = RequestResult {
      outcome: Outcome::Error(ResponseError::Api {
        status: StatusCode::NOT_FOUND,
        error: "missing".to_string(),
      }),
      request: request(),
      response: None,
    };

    assert!(!result.is_data());
    assert!(result.data().is_none());
    assert_eq!(result.error().and_then(ResponseError::status), Some(StatusCode::NOT_FOUND));

    match result.into_result() {
      Err(ResponseError::Api { error, .. }) => assert_eq!(error, "missing"),
      other => panic!("Expected Api error, got {other:?}"),
    }
  }

  #[test]
  fn test_transport_error_has_no_status() {
    let error: ResponseError<()> = TransportError::failed("connection reset").into();

    assert!(error.status().is_none());
    assert_eq!(error.to_string(), "connection reset");
  }
}
