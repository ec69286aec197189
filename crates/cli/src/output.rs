//! Terminal output for builds and dry runs.
//!
//! Status lines go to stdout, warnings and errors to stderr. Colors are only
//! emitted when the stream supports them.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use applebuild_lib::compiler::CompilerWarning;
use applebuild_lib::execute::{BuildPlan, Invocation};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const TRACE: &str = "+";
}

/// Build times: milliseconds for no-op runs, seconds with one decimal, then minutes.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  match secs {
    0 => format!("{}ms", duration.as_millis()),
    1..=59 => format!("{:.1}s", duration.as_secs_f64()),
    _ => format!("{}m {:02}s", secs / 60, secs % 60),
  }
}

pub fn print_error(err: &anyhow::Error) {
  let message = format!("error: {:#}", err);
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// One line per ignored compiler override; the build still goes ahead.
pub fn print_compiler_warnings(warnings: &[CompilerWarning]) {
  for warning in warnings {
    let message = format!("warning: {}", warning);
    eprintln!(
      "{} {}",
      symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
      message.if_supports_color(Stream::Stderr, |s| s.yellow())
    );
  }
}

pub fn print_build_start(plan: &BuildPlan, target: &str) {
  println!(
    "{} Building {} for {} [{}] ({})",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    target,
    plan.platform,
    plan.archs,
    plan.configuration
  );
}

pub fn print_build_success(artifact: &Path, elapsed: Duration) {
  println!(
    "{} Built {} in {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    artifact.display(),
    format_duration(elapsed)
  );
}

/// Print a cmake invocation the way `sh -x` traces a command.
pub fn print_invocation(invocation: &Invocation) {
  println!(
    "{} {}",
    symbols::TRACE.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    invocation
  );
}

/// Label/value rows shown under a text dry run.
pub fn plan_summary(plan: &BuildPlan) -> Vec<(&'static str, String)> {
  let compiler = |path: Option<&Path>| {
    path
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "cmake default".to_string())
  };
  vec![
    ("Platform", plan.platform.to_string()),
    ("Architectures", plan.archs.joined()),
    ("Configuration", plan.configuration.to_string()),
    ("C compiler", compiler(plan.compilers.cc.as_deref())),
    ("C++ compiler", compiler(plan.compilers.cxx.as_deref())),
    ("Artifact", format!("{} {}", symbols::ARROW, plan.artifact.display())),
  ]
}

pub fn print_plan_summary(plan: &BuildPlan) {
  for (label, value) in plan_summary(plan) {
    println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
  }
}

pub fn print_plan_json(plan: &BuildPlan) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(plan).context("Failed to serialize build plan")?;
  println!("{}", json);
  Ok(())
}
