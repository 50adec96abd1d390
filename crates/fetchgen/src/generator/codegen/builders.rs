use syn::{
  AngleBracketedGenericArguments, Expr, ExprCall, ExprPath, ExprReturn, GenericArgument, Path, PathArguments,
  PathSegment, Stmt, punctuated::Punctuated,
};

use crate::generator::ast::{CallName, CallNode, ReturnNode, TypeArgument};

/// Builds `name::<types>(args)`. Without type arguments no generic list is emitted.
#[must_use]
pub fn build_call(name: &CallName, args: Vec<Expr>, types: &[TypeArgument]) -> CallNode {
  let arguments = if types.is_empty() {
    PathArguments::None
  } else {
    PathArguments::AngleBracketed(AngleBracketedGenericArguments {
      colon2_token: Some(Default::default()),
      lt_token: Default::default(),
      args: types
        .iter()
        .map(|ty| GenericArgument::Type(ty.as_type().clone()))
        .collect(),
      gt_token: Default::default(),
    })
  };

  let callee = ExprPath {
    attrs: Vec::new(),
    qself: None,
    path: Path {
      leading_colon: None,
      segments: Punctuated::from_iter([PathSegment {
        ident: name.as_ident().clone(),
        arguments,
      }]),
    },
  };

  CallNode::new(ExprCall {
    attrs: Vec::new(),
    func: Box::new(Expr::Path(callee)),
    paren_token: Default::default(),
    args: args.into_iter().collect(),
  })
}

/// Builds `return expression;`, or a bare `return;`.
#[must_use]
pub fn build_return(expression: Option<Expr>) -> ReturnNode {
  ReturnNode::new(Stmt::Expr(
    Expr::Return(ExprReturn {
      attrs: Vec::new(),
      return_token: Default::default(),
      expr: expression.map(Box::new),
    }),
    Some(Default::default()),
  ))
}

#[must_use]
pub fn build_return_of_call(name: &CallName, args: Vec<Expr>, types: &[TypeArgument]) -> ReturnNode {
  build_return(Some(build_call(name, args, types).into()))
}
