//! Implementation of the default build command.
//!
//! Runs cmake configure, build and install in order, then checks that the
//! static library landed in the dist directory.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use applebuild_lib::execute::{
  BuildPlan, BuildRequest, CommandRunner, Invocation, ProcessRunner, RunError, run_pipeline,
};

use crate::output::{print_build_start, print_build_success, print_compiler_warnings, print_invocation};

/// Traces each invocation to stdout before handing it to `inner`.
struct EchoingRunner<R> {
  inner: R,
}

impl<R: CommandRunner> CommandRunner for EchoingRunner<R> {
  fn run(&mut self, invocation: &Invocation) -> Result<(), RunError> {
    print_invocation(invocation);
    self.inner.run(invocation)
  }
}

pub fn cmd_build(request: &BuildRequest) -> Result<()> {
  let start = Instant::now();

  let plan = BuildPlan::new(request)?;
  print_compiler_warnings(&plan.compilers.warnings);
  print_build_start(&plan, &request.target.cmake_target);

  let mut runner = EchoingRunner { inner: ProcessRunner };
  let outcome = run_pipeline(&plan, &mut runner)?;

  let elapsed = start.elapsed();
  info!(artifact = %outcome.artifact.display(), elapsed = ?elapsed, "build finished");
  print_build_success(&outcome.artifact, elapsed);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use applebuild_lib::execute::Phase;

  #[derive(Default)]
  struct Scripted {
    seen: Vec<Phase>,
    fail_on: Option<Phase>,
  }

  impl CommandRunner for Scripted {
    fn run(&mut self, invocation: &Invocation) -> Result<(), RunError> {
      self.seen.push(invocation.phase);
      if self.fail_on == Some(invocation.phase) {
        return Err(RunError::Failed {
          phase: invocation.phase,
          command: invocation.to_string(),
          code: Some(4),
        });
      }
      Ok(())
    }
  }

  #[test]
  fn echoing_runner_forwards_every_invocation() {
    let mut runner = EchoingRunner {
      inner: Scripted::default(),
    };
    for phase in [Phase::Configure, Phase::Build, Phase::Install] {
      runner.run(&Invocation::new(phase, "cmake")).unwrap();
    }
    assert_eq!(runner.inner.seen, [Phase::Configure, Phase::Build, Phase::Install]);
  }

  #[test]
  fn echoing_runner_returns_inner_failure() {
    let mut runner = EchoingRunner {
      inner: Scripted {
        fail_on: Some(Phase::Build),
        ..Default::default()
      },
    };
    let err = runner.run(&Invocation::new(Phase::Build, "cmake").arg("--build")).unwrap_err();
    assert!(matches!(err, RunError::Failed { code: Some(4), .. }));
  }
}
