use quote::ToTokens;
use syn::{Expr, Stmt};

use crate::generator::{
  ast::{CallName, ReturnNode, TypeArgument},
  codegen::builders::{build_call, build_return, build_return_of_call},
};

fn name(text: &str) -> CallName {
  CallName::parse(text).unwrap()
}

fn expr(text: &str) -> Expr {
  syn::parse_str(text).unwrap()
}

fn types(texts: &[&str]) -> Vec<TypeArgument> {
  texts.iter().map(|text| TypeArgument::parse(text).unwrap()).collect()
}

fn render(node: &ReturnNode) -> String {
  let file: syn::File = syn::parse_quote! {
    fn wrapper() {
      #node
    }
  };
  prettyplease::unparse(&file)
}

#[test]
fn test_build_call_matches_parsed_source() {
  let cases = [
    ("ping", vec![], vec![], "ping()"),
    ("fetchUser", vec!["id"], vec!["User"], "fetchUser::<User>(id)"),
    (
      "merge",
      vec!["a", "b.c", "1 + 2"],
      vec!["A", "Vec<B>"],
      "merge::<A, Vec<B>>(a, b.c, 1 + 2)",
    ),
    ("r#match", vec!["x"], vec![], "r#match(x)"),
  ];

  for (callee, args, generics, expected) in cases {
    let node = build_call(&name(callee), args.into_iter().map(expr).collect(), &types(&generics));
    assert_eq!(Expr::from(node), expr(expected), "building {expected}");
  }
}

#[test]
fn test_build_call_preserves_arity_and_type_order() {
  let node = build_call(
    &name("load"),
    vec![expr("first"), expr("second")],
    &types(&["Zeta", "Alpha", "Option<Beta>"]),
  );

  assert_eq!(node.arity(), 2);
  let rendered: Vec<String> = node
    .type_arguments()
    .into_iter()
    .map(|ty| ty.to_token_stream().to_string())
    .collect();
  assert_eq!(rendered, ["Zeta", "Alpha", "Option < Beta >"]);
  let args: Vec<&Expr> = node.args().collect();
  assert_eq!(args, [&expr("first"), &expr("second")]);
}

#[test]
fn test_build_call_without_types_has_no_generic_list() {
  let node = build_call(&name("ping"), vec![], &[]);

  assert!(node.type_arguments().is_empty());
  assert!(!node.to_token_stream().to_string().contains('<'));
}

#[test]
fn test_build_return() {
  let cases = [(None, "return;"), (Some(expr("value")), "return value;")];

  for (expression, expected) in cases {
    let node = build_return(expression);
    assert_eq!(*node.as_stmt(), syn::parse_str::<Stmt>(expected).unwrap(), "building {expected}");
  }
  assert!(build_return(None).expression().is_none());
}

#[test]
fn test_build_return_of_call() {
  let node = build_return_of_call(&name("fetchUser"), vec![expr("id")], &types(&["User"]));

  assert_eq!(
    *node.as_stmt(),
    syn::parse_str::<Stmt>("return fetchUser::<User>(id);").unwrap()
  );
  assert_eq!(node.call().map(|call| call.arity()), Some(1));

  let code = render(&node);
  assert!(
    code.contains("return fetchUser::<User>(id);"),
    "missing return statement:\n{code}"
  );
}

#[test]
fn test_builders_are_deterministic() {
  let build = || build_return_of_call(&name("fetchUser"), vec![expr("id")], &types(&["User"]));

  assert_eq!(build(), build());
}
