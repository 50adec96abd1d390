use proc_macro2::TokenStream;
use quote::quote;

pub mod builders;
pub mod normalize;
pub mod services;
pub mod statements;

#[cfg(test)]
mod tests;

/// Visibility of emitted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Crate,
  File,
}

impl Visibility {
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "public" => Some(Self::Public),
      "crate" => Some(Self::Crate),
      "file" => Some(Self::File),
      _ => None,
    }
  }

  pub(crate) fn to_tokens(self) -> TokenStream {
    match self {
      Self::Public => quote! { pub },
      Self::Crate => quote! { pub(crate) },
      Self::File => quote! {},
    }
  }
}
