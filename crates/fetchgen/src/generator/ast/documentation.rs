use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Doc comment lines attached to an emitted item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  /// Splits free text from an API description into lines. Escaped `\n`
  /// sequences count as line breaks.
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    Self {
      lines: input.replace("\\n", "\n").lines().map(str::trim_end).map(String::from).collect(),
    }
  }

  #[must_use]
  pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn push(&mut self, line: impl Into<String>) {
    self.lines.push(line.into());
  }

  /// Appends a paragraph, separated from existing lines by a blank one.
  pub fn push_paragraph(&mut self, paragraph: &Self) {
    if paragraph.is_empty() {
      return;
    }
    if !self.is_empty() {
      self.lines.push(String::new());
    }
    self.lines.extend(paragraph.lines.iter().cloned());
  }
}

impl ToTokens for Documentation {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    if self.lines.is_empty() {
      return;
    }
    let doc_lines = self.lines.iter().map(|line| {
      let line = if line.is_empty() { String::new() } else { format!(" {line}") };
      quote! { #[doc = #line] }
    });
    quote! { #(#doc_lines)* }.to_tokens(tokens);
  }
}

impl From<&str> for Documentation {
  fn from(s: &str) -> Self {
    Self::from_raw(s)
  }
}

impl From<Option<&str>> for Documentation {
  fn from(s: Option<&str>) -> Self {
    s.map_or_else(Self::default, Self::from_raw)
  }
}
