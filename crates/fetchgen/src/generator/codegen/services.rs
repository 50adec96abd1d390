use std::collections::BTreeSet;

use anyhow::{Context, anyhow, bail};
use http::Method;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Expr, ExprLit, ExprPath, Lit, LitStr, Path, PathSegment};
use tracing::debug;

use super::{Visibility, statements::create_return_function_call};
use crate::generator::{
  ast::{Arg, CallName, CallPlan, OperationPlan, TypeArgument, tokens::parse_ident},
  naming::identifiers::{ensure_unique, to_service_fn_name},
};

pub const DEFAULT_RUNTIME_CRATE: &str = "fetchgen_client";

/// Lowercase names the emitted `use` line brings into scope.
const IMPORTED_FUNCTIONS: [&str; 1] = ["send"];

const STANDARD_METHODS: [Method; 9] = [
  Method::CONNECT,
  Method::DELETE,
  Method::GET,
  Method::HEAD,
  Method::OPTIONS,
  Method::PATCH,
  Method::POST,
  Method::PUT,
  Method::TRACE,
];

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ServiceConfig {
  #[builder(default)]
  pub visibility: Visibility,
  /// Path of the client runtime crate in emitted `use` items.
  #[builder(default = DEFAULT_RUNTIME_CRATE.to_string(), into)]
  pub runtime_crate: String,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// Renders one function per operation as a formatted module.
pub fn generate_services(operations: &[OperationPlan], config: &ServiceConfig) -> anyhow::Result<String> {
  let tokens = generate_service_tokens(operations, config)?;
  let file = syn::parse2::<syn::File>(tokens).context("generated services are not a valid module")?;
  Ok(prettyplease::unparse(&file))
}

pub(crate) fn generate_service_tokens(
  operations: &[OperationPlan],
  config: &ServiceConfig,
) -> anyhow::Result<TokenStream> {
  let runtime = syn::parse_str::<syn::Path>(&config.runtime_crate)
    .map_err(|err| anyhow!("invalid runtime crate path `{}`: {err}", config.runtime_crate))?;

  let mut used_names = IMPORTED_FUNCTIONS.iter().map(ToString::to_string).collect::<BTreeSet<_>>();
  let functions = itertools::process_results(
    operations.iter().map(|operation| {
      let name = ensure_unique(&to_service_fn_name(&operation.operation_id), &used_names);
      used_names.insert(name.clone());
      generate_service(operation, &name, config.visibility)
    }),
    |iter| iter.collect::<Vec<_>>(),
  )?;

  Ok(quote! {
    #[allow(unused_imports)]
    use #runtime::{Method, Options, ResponseFuture, Value, send};

    #(#functions)*
  })
}

/// Emits `fn name(options: Options<Data>) -> ResponseFuture<Response, Error>`
/// whose body returns the `send` call for the operation.
pub(crate) fn generate_service(
  operation: &OperationPlan,
  fn_name: &str,
  visibility: Visibility,
) -> anyhow::Result<TokenStream> {
  let ident = parse_ident(fn_name).ok_or_else(|| anyhow!("`{fn_name}` is not a valid function name"))?;
  let data = parse_type(operation.data_type.as_deref().unwrap_or("()"))?;
  let response = parse_type(operation.response_type.as_deref().unwrap_or("Value"))?;
  let error = parse_type(operation.error_type.as_deref().unwrap_or("Value"))?;
  let method = method_expr(&operation.method)
    .with_context(|| format!("operation `{}` cannot be emitted", operation.operation_id))?;

  let plan = CallPlan::builder()
    .name(CallName::from(format_ident!("send")))
    .args(vec![
      Arg::Expression(method),
      Arg::Expression(path_literal(&operation.path)),
      Arg::from("options"),
    ])
    .types(vec![response.clone(), error.clone(), data.clone()])
    .build();
  let body = create_return_function_call(plan);

  debug!(operation = %operation.operation_id, function = %ident, "emitting service");

  let docs = operation.documentation();
  let vis = visibility.to_tokens();
  Ok(quote! {
    #docs
    #vis fn #ident(options: Options<#data>) -> ResponseFuture<#response, #error> {
      #body
    }
  })
}

fn parse_type(text: &str) -> anyhow::Result<TypeArgument> {
  TypeArgument::parse(text).map_err(|err| anyhow!("failed to parse type `{text}`: {err}"))
}

fn method_expr(method: &Method) -> anyhow::Result<Expr> {
  if !STANDARD_METHODS.contains(method) {
    bail!("method `{method}` has no constant on the runtime's `Method`");
  }
  let mut path = Path::from(format_ident!("Method"));
  path.segments.push(PathSegment::from(format_ident!("{}", method.as_str())));
  Ok(Expr::Path(ExprPath {
    attrs: Vec::new(),
    qself: None,
    path,
  }))
}

fn path_literal(path: &str) -> Expr {
  Expr::Lit(ExprLit {
    attrs: Vec::new(),
    lit: Lit::Str(LitStr::new(path, Span::call_site())),
  })
}
