use super::{Arg, CallName, TypeArgument};

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
  #[error("call name `{name}` is not a valid identifier")]
  InvalidName { name: String },

  #[error("type argument `{text}` is not a valid type: {source}")]
  InvalidTypeArgument {
    text: String,
    #[source]
    source: syn::Error,
  },
}

/// Everything needed to emit `return name::<types>(args);`.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CallPlan {
  name: CallName,
  #[builder(default)]
  args: Vec<Arg>,
  #[builder(default)]
  types: Vec<TypeArgument>,
}

impl CallPlan {
  /// Builds a plan from raw text, validating the name and every type argument.
  ///
  /// Arguments are not validated here; they are normalized when the
  /// statement is composed.
  pub fn parse<A, T>(
    name: &str,
    args: impl IntoIterator<Item = A>,
    types: impl IntoIterator<Item = T>,
  ) -> Result<Self, PlanError>
  where
    A: Into<Arg>,
    T: AsRef<str>,
  {
    let name = CallName::parse(name).ok_or_else(|| PlanError::InvalidName { name: name.to_string() })?;
    let types = types
      .into_iter()
      .map(|text| {
        let text = text.as_ref();
        TypeArgument::parse(text).map_err(|source| PlanError::InvalidTypeArgument {
          text: text.to_string(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      name,
      args: args.into_iter().map(Into::into).collect(),
      types,
    })
  }

  #[must_use]
  pub fn name(&self) -> &CallName {
    &self.name
  }

  #[must_use]
  pub fn args(&self) -> &[Arg] {
    &self.args
  }

  #[must_use]
  pub fn types(&self) -> &[TypeArgument] {
    &self.types
  }

  pub(crate) fn into_parts(self) -> (CallName, Vec<Arg>, Vec<TypeArgument>) {
    (self.name, self.args, self.types)
  }
}
