pub mod ast;
pub mod codegen;
pub(crate) mod naming;

pub use ast::{Arg, CallName, CallNode, CallPlan, Documentation, OperationPlan, PlanError, ReturnNode, TypeArgument};
pub use codegen::{
  Visibility,
  builders::{build_call, build_return, build_return_of_call},
  normalize::{normalize_arg, normalize_args},
  services::{ServiceConfig, generate_services},
  statements::create_return_function_call,
};
