use syn::Expr;

/// Call argument as handed over by the caller: a bare name, or an expression
/// that is already a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
  Identifier(String),
  Expression(Expr),
}

impl From<&str> for Arg {
  fn from(name: &str) -> Self {
    Self::Identifier(name.to_string())
  }
}

impl From<String> for Arg {
  fn from(name: String) -> Self {
    Self::Identifier(name)
  }
}

impl From<Expr> for Arg {
  fn from(expr: Expr) -> Self {
    Self::Expression(expr)
  }
}
