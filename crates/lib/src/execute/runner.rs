//! Subprocess execution for build engine invocations.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info};

use crate::execute::types::{Phase, RunError};
use crate::util::lossy;

/// A fully-formed argument vector for one build phase.
///
/// Arguments are passed to the process byte for byte; only [`fmt::Display`]
/// and the serialized form are lossy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub phase: Phase,
  #[serde(serialize_with = "lossy::serialize")]
  pub program: PathBuf,
  #[serde(serialize_with = "lossy::serialize_all")]
  pub args: Vec<OsString>,
  /// Working directory; `None` inherits the caller's.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(phase: Phase, program: impl Into<PathBuf>) -> Self {
    Self {
      phase,
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.as_os_str())
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

/// Renders the invocation as a copy-pasteable shell command.
impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
    for arg in &self.args {
      write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
    }
    Ok(())
  }
}

/// Quote `word` for a POSIX shell, leaving plain words untouched.
pub fn shell_quote(word: &str) -> String {
  let is_plain = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c);
  if !word.is_empty() && word.chars().all(is_plain) {
    return word.to_string();
  }
  format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

/// Runs build engine invocations.
///
/// Implementations block until the process exits and report any unsuccessful
/// exit as [`RunError::Failed`].
pub trait CommandRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), RunError>;
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), RunError> {
    let printable = invocation.to_string();
    info!(phase = %invocation.phase, cmd = %printable, "running");

    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    let status = command.status().map_err(|source| RunError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;

    debug!(phase = %invocation.phase, status = %status, "process exited");

    if !status.success() {
      return Err(RunError::Failed {
        phase: invocation.phase,
        command: printable,
        code: status.code(),
      });
    }
    Ok(())
  }
}
