use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

static KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let",
    "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type",
    "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen",
  ]
  .into_iter()
  .collect()
});

/// Keywords that cannot be raw identifiers either.
static PATH_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| ["crate", "self", "super"].into_iter().collect());

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, turns runs of other characters into `_` and trims
/// underscores at both ends.
pub(crate) fn sanitize(input: &str) -> String {
  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");
  collapsed.trim_matches('_').to_string()
}

/// Function name for an operation id, in `snake_case`.
///
/// Keywords get the raw prefix, `crate`/`self`/`super` a trailing `_`, names
/// starting with a digit an `op_` prefix, and an empty result becomes `operation`.
pub(crate) fn to_service_fn_name(operation_id: &str) -> String {
  let ident = sanitize(operation_id).to_snake_case();

  if ident.is_empty() {
    return "operation".to_string();
  }
  if PATH_KEYWORDS.contains(ident.as_str()) {
    return format!("{ident}_");
  }
  if KEYWORDS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("op_{ident}");
  }
  ident
}

/// Appends the smallest numeric suffix, starting at 2, that makes `base_name` unused.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  (2..)
    .map(|suffix| format!("{base_name}{suffix}"))
    .find(|candidate| !used_names.contains(candidate))
    .unwrap_or_else(|| base_name.to_string())
}
