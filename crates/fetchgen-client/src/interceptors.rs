use std::{
  fmt,
  sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
  },
};

use crate::{
  body::ResponseBody,
  transport::{HttpRequest, HttpResponse},
};

pub type RequestFn = dyn Fn(HttpRequest) -> HttpRequest + Send + Sync;
pub type ResponseFn = dyn Fn(HttpResponse, &HttpRequest) -> HttpResponse + Send + Sync;
pub type ErrorFn = dyn Fn(ResponseBody, &HttpResponse, &HttpRequest) -> ResponseBody + Send + Sync;

/// Handle returned by `use_fn`; pass it to `eject` to remove the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterceptorId(u64);

/// Ordered list of handlers for one interception point.
pub struct Registry<F: ?Sized> {
  next_id: AtomicU64,
  fns: RwLock<Vec<(InterceptorId, Arc<F>)>>,
}

impl<F: ?Sized> Default for Registry<F> {
  fn default() -> Self {
    Self {
      next_id: AtomicU64::new(0),
      fns: RwLock::new(Vec::new()),
    }
  }
}

impl<F: ?Sized> fmt::Debug for Registry<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry").field("len", &self.len()).finish()
  }
}

impl<F: ?Sized> Registry<F> {
  fn push(&self, handler: Arc<F>) -> InterceptorId {
    let id = InterceptorId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.fns.write().unwrap_or_else(PoisonError::into_inner).push((id, handler));
    id
  }

  /// Removes the interceptor; returns whether it was registered.
  pub fn eject(&self, id: InterceptorId) -> bool {
    let mut fns = self.fns.write().unwrap_or_else(PoisonError::into_inner);
    let before = fns.len();
    fns.retain(|(existing, _)| *existing != id);
    fns.len() != before
  }

  #[must_use]
  pub fn exists(&self, id: InterceptorId) -> bool {
    self
      .fns
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .any(|(existing, _)| *existing == id)
  }

  pub fn clear(&self) {
    self.fns.write().unwrap_or_else(PoisonError::into_inner).clear();
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.fns.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Handlers in registration order, detached from the lock.
  pub(crate) fn snapshot(&self) -> Vec<Arc<F>> {
    self
      .fns
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .map(|(_, handler)| Arc::clone(handler))
      .collect()
  }
}

impl Registry<RequestFn> {
  pub fn use_fn(&self, handler: impl Fn(HttpRequest) -> HttpRequest + Send + Sync + 'static) -> InterceptorId {
    self.push(Arc::new(handler))
  }
}

impl Registry<ResponseFn> {
  pub fn use_fn(
    &self,
    handler: impl Fn(HttpResponse, &HttpRequest) -> HttpResponse + Send + Sync + 'static,
  ) -> InterceptorId {
    self.push(Arc::new(handler))
  }
}

impl Registry<ErrorFn> {
  pub fn use_fn(
    &self,
    handler: impl Fn(ResponseBody, &HttpResponse, &HttpRequest) -> ResponseBody + Send + Sync + 'static,
  ) -> InterceptorId {
    self.push(Arc::new(handler))
  }
}

/// Middleware attached to a client. Each list runs in registration order.
#[derive(Debug, Default)]
pub struct Interceptors {
  pub request: Registry<RequestFn>,
  pub response: Registry<ResponseFn>,
  pub error: Registry<ErrorFn>,
}
