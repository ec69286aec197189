//! Types for pipeline execution.
//!
//! This module defines the build phases and the error types raised while
//! validating a request and running the external build engine.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::platform::arch::ArchError;

/// One of the three build engine invocations, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  Configure,
  Build,
  Install,
}

impl Phase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Configure => "configure",
      Self::Build => "build",
      Self::Install => "install",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Errors raised by a [`CommandRunner`](crate::execute::runner::CommandRunner).
#[derive(Debug, Error)]
pub enum RunError {
  /// The process could not be started at all.
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and exited unsuccessfully; `code` is `None` when killed by a signal.
  #[error("{phase} step {}: {command}", describe_exit(.code))]
  Failed {
    phase: Phase,
    command: String,
    code: Option<i32>,
  },
}

/// Errors that abort a build invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// The build engine executable does not exist.
  #[error("cmake not found at {}", path.display())]
  MissingBuildEngine { path: PathBuf },

  /// The architecture spec normalized to nothing.
  #[error(transparent)]
  Arch(#[from] ArchError),

  /// A configure, build or install step failed.
  #[error(transparent)]
  Run(#[from] RunError),

  /// Every step succeeded but the library was not installed.
  #[error("built library not found: {}", path.display())]
  MissingArtifact { path: PathBuf },
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("failed with exit code {}", code),
    None => "was terminated by a signal".to_string(),
  }
}

impl PipelineError {
  /// Process exit status to report for this error.
  ///
  /// Step failures pass the child's exit code through; everything else is 1.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::Run(RunError::Failed { code: Some(code), .. }) if *code != 0 => *code,
      _ => 1,
    }
  }
}
