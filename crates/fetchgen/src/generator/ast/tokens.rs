use std::fmt::{Display, Formatter};

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{Ident, Type};

/// Parses `text` as exactly one identifier, accepting raw identifiers such as `r#type`.
///
/// Keywords, surrounding whitespace and anything that is not a single
/// identifier token yield `None`.
pub(crate) fn parse_ident(text: &str) -> Option<Ident> {
  let ident = syn::parse_str::<Ident>(text).ok()?;
  (ident == text).then_some(ident)
}

/// Callee of a generated function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallName(Ident);

impl CallName {
  #[must_use]
  pub fn parse(name: &str) -> Option<Self> {
    parse_ident(name).map(Self)
  }

  #[must_use]
  pub fn as_ident(&self) -> &Ident {
    &self.0
  }
}

impl From<Ident> for CallName {
  fn from(ident: Ident) -> Self {
    Self(ident)
  }
}

impl Display for CallName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl ToTokens for CallName {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    self.0.to_tokens(tokens);
  }
}

/// Generic type argument of a call, kept in caller order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeArgument(Type);

impl TypeArgument {
  pub fn parse(text: &str) -> syn::Result<Self> {
    syn::parse_str(text).map(Self)
  }

  #[must_use]
  pub fn as_type(&self) -> &Type {
    &self.0
  }
}

impl From<Type> for TypeArgument {
  fn from(ty: Type) -> Self {
    Self(ty)
  }
}

impl Display for TypeArgument {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.to_token_stream().fmt(f)
  }
}

impl ToTokens for TypeArgument {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    self.0.to_tokens(tokens);
  }
}
