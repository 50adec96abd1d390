use crate::generator::ast::{CallName, TypeArgument, tokens::parse_ident};

#[test]
fn test_parse_ident() {
  let cases = [
    ("fetchUser", true),
    ("_id", true),
    ("r#type", true),
    ("type", false),
    ("fetch user", false),
    (" id", false),
    ("", false),
    ("9lives", false),
  ];

  for (input, valid) in cases {
    assert_eq!(parse_ident(input).is_some(), valid, "parsing {input:?}");
  }
}

#[test]
fn test_call_name_display() {
  assert_eq!(CallName::parse("r#match").unwrap().to_string(), "r#match");
  assert!(CallName::parse("a::b").is_none());
}

#[test]
fn test_type_argument_parse() {
  let cases = [
    ("User", true),
    ("Vec<Option<Pet>>", true),
    ("()", true),
    ("crate::models::Pet", true),
    ("Vec<", false),
    ("", false),
  ];

  for (input, valid) in cases {
    assert_eq!(TypeArgument::parse(input).is_ok(), valid, "parsing {input:?}");
  }
}
