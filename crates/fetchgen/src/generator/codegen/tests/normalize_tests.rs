use syn::Expr;
use tracing_test::traced_test;

use crate::generator::{
  ast::Arg,
  codegen::normalize::{normalize_arg, normalize_args},
};

fn expr(text: &str) -> Expr {
  syn::parse_str(text).unwrap()
}

#[test]
fn test_expressions_pass_through() {
  let cases = ["id", "user.id", "compute(1, 2)", "\"literal\"", "&options"];

  for text in cases {
    let original = expr(text);
    assert_eq!(normalize_arg(Arg::from(original.clone())), Some(original), "normalizing {text}");
  }
}

#[test]
fn test_identifiers_become_paths() {
  let cases = ["id", "userId", "_private", "r#type", "data2"];

  for text in cases {
    assert_eq!(normalize_arg(Arg::from(text)), Some(expr(text)), "normalizing {text}");
  }
}

#[test]
fn test_non_identifiers_are_dropped() {
  let cases = ["", " id", "user id", "a.b", "1abc", "return", "fn", "x+1"];

  for text in cases {
    assert_eq!(normalize_arg(Arg::from(text)), None, "normalizing {text:?}");
  }
}

#[test]
#[traced_test]
fn test_dropped_arguments_are_traced() {
  assert!(normalize_arg(Arg::from("not an ident")).is_none());
  assert!(logs_contain("dropping argument"));
}

#[test]
fn test_normalize_args_keeps_order() {
  let args = vec![
    Arg::from("a"),
    Arg::from("bad name"),
    Arg::from(expr("x + 1")),
    Arg::from(String::from("b")),
  ];

  assert_eq!(normalize_args(args), vec![expr("a"), expr("x + 1"), expr("b")]);
}
