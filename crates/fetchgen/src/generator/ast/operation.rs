use http::Method;

use super::Documentation;

/// One API operation as handed over by the description parser.
///
/// Type names are Rust type expressions; the runtime's `Value` stands in for
/// missing response and error types, `()` for missing operation data.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
#[builder(on(String, into))]
pub struct OperationPlan {
  pub operation_id: String,
  pub method: Method,
  /// Path template, e.g. `/pets/{id}`.
  pub path: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub data_type: Option<String>,
  pub response_type: Option<String>,
  pub error_type: Option<String>,
}

impl OperationPlan {
  /// Summary, description and `METHOD /path`, as paragraphs.
  #[must_use]
  pub fn documentation(&self) -> Documentation {
    let mut docs = Documentation::from(self.summary.as_deref());
    docs.push_paragraph(&Documentation::from(self.description.as_deref()));
    docs.push_paragraph(&Documentation::from_lines([format!("`{} {}`", self.method, self.path)]));
    docs
  }
}
