//! The configure → build → install pipeline.
//!
//! [`BuildPlan::new`] performs every check that can fail before a process is
//! spawned and assembles the three invocations. [`run_pipeline`] executes them
//! strictly in order, stops at the first failure, and then verifies that the
//! static library was actually installed.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::compiler::{CompilerOverrides, ResolvedCompilerSet, resolve_compilers};
use crate::consts::{
  DEFAULT_CMAKE, DEFAULT_GENERATOR, DEFAULT_MAKE_PROGRAM, DEFAULT_PACKAGE_ROOT, DEFAULT_XCODE_PATH, LIBRARY_ARTIFACT,
  LIBRARY_TARGET,
};
use crate::execute::runner::{CommandRunner, Invocation};
use crate::execute::types::{Phase, PipelineError};
use crate::platform::arch::ArchList;
use crate::platform::config::{CacheEntry, PlatformConfig};
use crate::platform::{Configuration, Platform};
use crate::toolchain::Toolchain;

/// Library cache switches that are always turned off.
const DISABLED_FEATURES: [&str; 4] = ["QUIC_BUILD_SHARED", "QUIC_BUILD_TOOLS", "QUIC_BUILD_TEST", "QUIC_BUILD_PERF"];

/// The single CMake target built per invocation and the file it installs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryTarget {
  pub cmake_target: String,
  /// File name under `<dist>/lib`.
  pub artifact: String,
}

impl Default for LibraryTarget {
  fn default() -> Self {
    Self {
      cmake_target: LIBRARY_TARGET.to_string(),
      artifact: LIBRARY_ARTIFACT.to_string(),
    }
  }
}

/// Everything the user asked for in one invocation.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  pub cmake: PathBuf,
  pub package_root: PathBuf,
  pub build_dir: PathBuf,
  pub dist_dir: PathBuf,
  pub configuration: Configuration,
  pub platform: Platform,
  /// Free-form architecture list, normalized by [`ArchList::parse`].
  pub arch_spec: String,
  pub toolchain: Toolchain,
  /// `None` or empty leaves generator selection to CMake.
  pub generator: Option<String>,
  pub make_program: Option<String>,
  pub compilers: CompilerOverrides,
  /// Enables library logging with the given backend, e.g. `stdout`.
  pub logging_type: Option<String>,
  pub target: LibraryTarget,
}

impl BuildRequest {
  /// A request with default tool paths for the given directories and platform.
  pub fn new(
    build_dir: impl Into<PathBuf>,
    dist_dir: impl Into<PathBuf>,
    platform: Platform,
    arch_spec: impl Into<String>,
  ) -> Self {
    Self {
      cmake: PathBuf::from(DEFAULT_CMAKE),
      package_root: PathBuf::from(DEFAULT_PACKAGE_ROOT),
      build_dir: build_dir.into(),
      dist_dir: dist_dir.into(),
      configuration: Configuration::default(),
      platform,
      arch_spec: arch_spec.into(),
      toolchain: Toolchain::new(DEFAULT_XCODE_PATH),
      generator: Some(DEFAULT_GENERATOR.to_string()),
      make_program: Some(DEFAULT_MAKE_PROGRAM.to_string()),
      compilers: CompilerOverrides::default(),
      logging_type: None,
      target: LibraryTarget::default(),
    }
  }

  /// `<dist>/lib/<artifact>`, checked after installation.
  pub fn artifact_path(&self) -> PathBuf {
    self.dist_dir.join("lib").join(&self.target.artifact)
  }
}

/// Validated, fully-resolved invocations for one build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
  pub platform: Platform,
  pub configuration: Configuration,
  pub archs: ArchList,
  pub compilers: ResolvedCompilerSet,
  pub platform_config: PlatformConfig,
  pub configure: Invocation,
  pub build: Invocation,
  pub install: Invocation,
  pub artifact: PathBuf,
}

impl BuildPlan {
  /// Validate `request` and assemble the three invocations.
  ///
  /// Fails before anything runs if the build engine is missing or the
  /// architecture list is empty. Compiler problems only produce warnings.
  pub fn new(request: &BuildRequest) -> Result<Self, PipelineError> {
    let cmake = resolve_build_engine(&request.cmake)?;
    let archs = ArchList::parse(&request.arch_spec)?;
    debug!(archs = %archs, "normalized architectures");

    let compilers = resolve_compilers(&request.compilers, &request.toolchain);
    let platform_config = PlatformConfig::derive(request.platform, &archs, &request.toolchain);

    let configure = configure_invocation(request, &cmake, &compilers, &platform_config);
    let build = Invocation::new(Phase::Build, &cmake)
      .arg("--build")
      .path_arg(&request.build_dir)
      .args(["--target", request.target.cmake_target.as_str()])
      .args(["--config", request.configuration.as_str()]);
    let install = Invocation::new(Phase::Install, &cmake)
      .arg("--install")
      .path_arg(&request.build_dir);

    Ok(Self {
      platform: request.platform,
      configuration: request.configuration,
      archs,
      compilers,
      platform_config,
      configure,
      build,
      install,
      artifact: request.artifact_path(),
    })
  }

  /// The invocations in the order they must run.
  pub fn invocations(&self) -> [&Invocation; 3] {
    [&self.configure, &self.build, &self.install]
  }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
  pub artifact: PathBuf,
}

/// Run configure, build and install in order, then check the artifact exists.
///
/// The first failing step aborts the run; later steps are never started.
pub fn run_pipeline(plan: &BuildPlan, runner: &mut dyn CommandRunner) -> Result<BuildOutcome, PipelineError> {
  for invocation in plan.invocations() {
    info!(phase = %invocation.phase, "starting phase");
    runner.run(invocation)?;
  }

  if !plan.artifact.exists() {
    return Err(PipelineError::MissingArtifact {
      path: plan.artifact.clone(),
    });
  }

  info!(artifact = %plan.artifact.display(), "build complete");
  Ok(BuildOutcome {
    artifact: plan.artifact.clone(),
  })
}

/// Locate the build engine.
///
/// Existing paths are used as given. A bare program name that does not exist in
/// the working directory is looked up on `PATH`.
pub fn resolve_build_engine(cmake: &Path) -> Result<PathBuf, PipelineError> {
  if cmake.exists() {
    return Ok(cmake.to_path_buf());
  }

  let mut components = cmake.components();
  let is_bare_name = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
  if is_bare_name {
    if let Ok(found) = which::which(cmake) {
      debug!(path = %found.display(), "found cmake on PATH");
      return Ok(found);
    }
  }

  Err(PipelineError::MissingBuildEngine {
    path: cmake.to_path_buf(),
  })
}

fn configure_invocation(
  request: &BuildRequest,
  cmake: &Path,
  compilers: &ResolvedCompilerSet,
  platform_config: &PlatformConfig,
) -> Invocation {
  let mut invocation = Invocation::new(Phase::Configure, cmake)
    .arg("-S")
    .path_arg(&request.package_root)
    .arg("-B")
    .path_arg(&request.build_dir)
    .args(DISABLED_FEATURES.iter().map(|key| CacheEntry::new(*key, "OFF").to_arg()));

  if let Some(logging_type) = non_empty(&request.logging_type) {
    invocation = invocation.args([
      CacheEntry::new("QUIC_ENABLE_LOGGING", "ON").to_arg(),
      CacheEntry::new("QUIC_LOGGING_TYPE", logging_type).to_arg(),
    ]);
  }

  invocation = invocation
    .arg(CacheEntry::new("CMAKE_INSTALL_PREFIX", &request.dist_dir).to_arg())
    .arg(CacheEntry::new("CMAKE_BUILD_TYPE", request.configuration.as_str()).to_arg())
    .args(compilers.cache_entries().iter().map(CacheEntry::to_arg));

  if let Some(generator) = non_empty(&request.generator) {
    invocation = invocation.args(["-G", generator]);
    if let Some(make_program) = non_empty(&request.make_program) {
      invocation = invocation.arg(CacheEntry::new("CMAKE_MAKE_PROGRAM", make_program).to_arg());
    }
  }

  invocation.args(platform_config.to_args())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}
