//! Implementation of `--dry-run`.
//!
//! Validates the request and prints the cmake invocations that a real build
//! would run, without spawning anything.

use anyhow::Result;

use applebuild_lib::execute::{BuildPlan, BuildRequest};

use crate::output::{OutputFormat, print_compiler_warnings, print_invocation, print_plan_json, print_plan_summary};

pub fn cmd_plan(request: &BuildRequest, format: OutputFormat) -> Result<()> {
  let plan = BuildPlan::new(request)?;
  print_compiler_warnings(&plan.compilers.warnings);

  if format.is_json() {
    return print_plan_json(&plan);
  }

  for invocation in plan.invocations() {
    print_invocation(invocation);
  }
  println!();
  print_plan_summary(&plan);

  Ok(())
}
