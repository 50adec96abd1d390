mod args;
mod call_plan;
mod documentation;
mod nodes;
mod operation;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use args::Arg;
pub use call_plan::{CallPlan, PlanError};
pub use documentation::Documentation;
pub use nodes::{CallNode, ReturnNode};
pub use operation::OperationPlan;
pub use tokens::{CallName, TypeArgument};
