use quote::ToTokens;

use crate::generator::ast::Documentation;

#[test]
fn test_from_raw_splits_lines() {
  let cases = [
    ("Single line", vec!["Single line"]),
    ("First\nSecond", vec!["First", "Second"]),
    ("Escaped\\nbreak", vec!["Escaped", "break"]),
    ("Trailing   \nspaces", vec!["Trailing", "spaces"]),
  ];

  for (input, expected) in cases {
    assert_eq!(Documentation::from_raw(input).lines(), expected, "splitting {input:?}");
  }
}

#[test]
fn test_push_paragraph_separates_with_blank_line() {
  let mut docs = Documentation::from("Summary");
  docs.push_paragraph(&Documentation::default());
  docs.push_paragraph(&Documentation::from("Details"));

  assert_eq!(docs.lines(), ["Summary", "", "Details"]);

  let mut empty = Documentation::default();
  empty.push_paragraph(&Documentation::from("Only"));
  assert_eq!(empty.lines(), ["Only"]);
}

#[test]
fn test_to_tokens() {
  assert!(Documentation::default().to_token_stream().is_empty());

  let tokens = Documentation::from_lines(["Hello", ""]).to_token_stream().to_string();
  assert!(tokens.contains("\" Hello\""), "unexpected tokens: {tokens}");
  assert!(tokens.contains("\"\""), "unexpected tokens: {tokens}");
}
