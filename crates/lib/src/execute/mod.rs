//! Build execution.
//!
//! This module turns a [`BuildRequest`] into a validated [`BuildPlan`] and runs it:
//! - configure, build and install run one after another, never concurrently
//! - the first failing step aborts the run
//! - a successful run must leave the static library under `<dist>/lib`

pub mod pipeline;
pub mod runner;
pub mod types;

pub use pipeline::{BuildOutcome, BuildPlan, BuildRequest, LibraryTarget, resolve_build_engine, run_pipeline};
pub use runner::{CommandRunner, Invocation, ProcessRunner};
pub use types::{Phase, PipelineError, RunError};
