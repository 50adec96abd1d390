pub use bytes::Bytes;
pub use futures::future::BoxFuture;
pub use http::{Method, StatusCode};
pub use serde_json::Value;

mod body;
mod client;
mod config;
mod error;
mod headers;
mod interceptors;
mod options;
mod query;
mod result;
mod transport;
mod url;

pub use body::{
  BodySerializeError, BodySerializer, DecodeError, JsonBodySerializer, RequestBody, ResponseBody, SerializedBody,
  UrlSearchParamsBodySerializer,
};
pub use client::Client;
pub use config::{Config, ParseAs, ResponseTransformer, global_config, set_global_config};
pub use error::{BoxError, ClientError};
pub use headers::{HeaderInput, merge_header_maps, merge_headers};
pub use interceptors::{ErrorFn, InterceptorId, Interceptors, Registry, RequestFn, ResponseFn};
pub use options::{
  AcceptsBody, AcceptsHeaders, AcceptsResponseTransformer, DataParts, OperationData, Options, Plain, RequestOptions,
  Shape, WithBody, WithBodyAndHeaders, WithHeaders, to_parameter_map,
};
pub use query::{
  ArrayOptions, ArrayStyle, COMPONENT_ENCODE_SET, ObjectOptions, ObjectStyle, QuerySerializeError, QuerySerializer,
  QuerySerializerOptions,
};
pub use result::{Outcome, RequestResult, ResponseError};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError};
pub use url::{build_url, substitute_path};

/// Future returned by generated operation functions.
pub type ResponseFuture<D, E> = BoxFuture<'static, Result<RequestResult<D, E>, ClientError>>;

/// Sends an operation through the client chosen in `options`, or the default
/// client bound to the process-wide config.
///
/// Generated service functions are thin wrappers around this call.
pub fn send<D, E, T>(method: Method, url: &str, options: Options<T>) -> ResponseFuture<D, E>
where
  D: serde::de::DeserializeOwned + Send + 'static,
  E: serde::de::DeserializeOwned + Send + 'static,
  T: OperationData,
{
  let prepared = options.into_request_options(url);
  Box::pin(async move {
    let (client, mut request_options) = prepared?;
    request_options.method = Some(method);
    client.unwrap_or_else(Client::global).request(request_options).await
  })
}
