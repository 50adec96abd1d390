use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{Expr, ExprCall, GenericArgument, PathArguments, Stmt, Type};

/// A function call expression: callee, optional generic arguments, arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallNode(ExprCall);

impl CallNode {
  pub(crate) fn new(call: ExprCall) -> Self {
    Self(call)
  }

  #[must_use]
  pub fn callee(&self) -> &Expr {
    &self.0.func
  }

  pub fn args(&self) -> impl Iterator<Item = &Expr> {
    self.0.args.iter()
  }

  #[must_use]
  pub fn arity(&self) -> usize {
    self.0.args.len()
  }

  /// Generic arguments on the callee, in order. Empty when the call has none.
  #[must_use]
  pub fn type_arguments(&self) -> Vec<&Type> {
    let Expr::Path(callee) = &*self.0.func else {
      return Vec::new();
    };
    let Some(PathArguments::AngleBracketed(generics)) = callee.path.segments.last().map(|segment| &segment.arguments)
    else {
      return Vec::new();
    };
    generics
      .args
      .iter()
      .filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
      })
      .collect()
  }

  #[must_use]
  pub fn as_expr_call(&self) -> &ExprCall {
    &self.0
  }
}

impl From<CallNode> for Expr {
  fn from(node: CallNode) -> Self {
    Expr::Call(node.0)
  }
}

impl ToTokens for CallNode {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    self.0.to_tokens(tokens);
  }
}

/// A `return` statement, with or without a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReturnNode(Stmt);

impl ReturnNode {
  pub(crate) fn new(stmt: Stmt) -> Self {
    Self(stmt)
  }

  /// The returned expression, `None` for a bare `return;`.
  #[must_use]
  pub fn expression(&self) -> Option<&Expr> {
    match &self.0 {
      Stmt::Expr(Expr::Return(ret), _) => ret.expr.as_deref(),
      _ => None,
    }
  }

  /// The returned call, when the statement returns one.
  #[must_use]
  pub fn call(&self) -> Option<CallNode> {
    match self.expression()? {
      Expr::Call(call) => Some(CallNode::new(call.clone())),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_stmt(&self) -> &Stmt {
    &self.0
  }
}

impl From<ReturnNode> for Stmt {
  fn from(node: ReturnNode) -> Self {
    node.0
  }
}

impl ToTokens for ReturnNode {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    self.0.to_tokens(tokens);
  }
}
