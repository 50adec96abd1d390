use super::{builders::build_return_of_call, normalize::normalize_args};
use crate::generator::ast::{CallPlan, ReturnNode};

/// Composes `return name::<types>(args);` from a call plan.
#[must_use]
pub fn create_return_function_call(plan: CallPlan) -> ReturnNode {
  let (name, args, types) = plan.into_parts();
  build_return_of_call(&name, normalize_args(args), &types)
}
