use syn::{Expr, ExprPath, Path};
use tracing::trace;

use crate::generator::ast::{Arg, tokens::parse_ident};

/// Turns a call argument into an expression.
///
/// Expressions pass through untouched. Names become a path expression naming
/// exactly that identifier; names that are not a valid identifier are dropped.
#[must_use]
pub fn normalize_arg(arg: Arg) -> Option<Expr> {
  match arg {
    Arg::Expression(expr) => Some(expr),
    Arg::Identifier(name) => {
      let Some(ident) = parse_ident(&name) else {
        trace!(argument = %name, "dropping argument that is not an identifier");
        return None;
      };
      Some(Expr::Path(ExprPath {
        attrs: Vec::new(),
        qself: None,
        path: Path::from(ident),
      }))
    }
  }
}

/// Normalizes every argument in order, leaving out dropped ones.
pub fn normalize_args(args: impl IntoIterator<Item = Arg>) -> Vec<Expr> {
  args.into_iter().filter_map(normalize_arg).collect()
}
