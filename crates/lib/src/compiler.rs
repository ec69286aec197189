//! C and C++ compiler selection.
//!
//! Each language is resolved independently:
//! 1. an explicit override (CLI flag, then environment variable) is used if it is
//!    an executable file; otherwise the language resolves to nothing and a warning
//!    is recorded,
//! 2. without an override, the toolchain default is used if it is executable,
//! 3. otherwise nothing is passed and CMake runs its own compiler detection.
//!
//! Resolution never fails; a bad override must not be the only reason a build aborts.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::consts::{C_COMPILER_ENV, CXX_COMPILER_ENV};
use crate::platform::config::CacheEntry;
use crate::toolchain::Toolchain;
use crate::util::fs::is_executable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
  C,
  Cxx,
}

impl Language {
  pub fn label(&self) -> &'static str {
    match self {
      Self::C => "C compiler",
      Self::Cxx => "C++ compiler",
    }
  }

  /// Environment variable consulted when no CLI override is given.
  pub fn env_var(&self) -> &'static str {
    match self {
      Self::C => C_COMPILER_ENV,
      Self::Cxx => CXX_COMPILER_ENV,
    }
  }

  fn cmake_key(&self) -> &'static str {
    match self {
      Self::C => "CMAKE_C_COMPILER",
      Self::Cxx => "CMAKE_CXX_COMPILER",
    }
  }

  fn default_path(&self, toolchain: &Toolchain) -> PathBuf {
    match self {
      Self::C => toolchain.default_cc(),
      Self::Cxx => toolchain.default_cxx(),
    }
  }
}

/// Explicit compiler paths requested for this invocation.
///
/// Empty paths are treated as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOverrides {
  cc: Option<PathBuf>,
  cxx: Option<PathBuf>,
}

impl CompilerOverrides {
  pub fn new(cc: Option<PathBuf>, cxx: Option<PathBuf>) -> Self {
    Self {
      cc: cc.filter(|p| !p.as_os_str().is_empty()),
      cxx: cxx.filter(|p| !p.as_os_str().is_empty()),
    }
  }

  /// Combine CLI overrides with `MSQUIC_C_COMPILER` / `MSQUIC_CXX_COMPILER`.
  ///
  /// A non-empty CLI value wins over the environment.
  pub fn from_env(cli_cc: Option<PathBuf>, cli_cxx: Option<PathBuf>) -> Self {
    let pick = |cli: Option<PathBuf>, language: Language| {
      cli
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| std::env::var_os(language.env_var()).map(PathBuf::from))
    };
    Self::new(pick(cli_cc, Language::C), pick(cli_cxx, Language::Cxx))
  }

  pub fn get(&self, language: Language) -> Option<&Path> {
    match language {
      Language::C => self.cc.as_deref(),
      Language::Cxx => self.cxx.as_deref(),
    }
  }
}

/// An override that was ignored because it is not an executable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerWarning {
  pub language: Language,
  pub path: PathBuf,
}

impl fmt::Display for CompilerWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} not executable: {}", self.language.label(), self.path.display())
  }
}

/// Compilers handed to the configure step; `None` leaves the choice to CMake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedCompilerSet {
  pub cc: Option<PathBuf>,
  pub cxx: Option<PathBuf>,
  #[serde(skip)]
  pub warnings: Vec<CompilerWarning>,
}

impl ResolvedCompilerSet {
  pub fn get(&self, language: Language) -> Option<&Path> {
    match language {
      Language::C => self.cc.as_deref(),
      Language::Cxx => self.cxx.as_deref(),
    }
  }

  /// `CMAKE_C_COMPILER` / `CMAKE_CXX_COMPILER` entries for the resolved languages.
  pub fn cache_entries(&self) -> Vec<CacheEntry> {
    [Language::C, Language::Cxx]
      .into_iter()
      .filter_map(|language| {
        self
          .get(language)
          .map(|path| CacheEntry::new(language.cmake_key(), path))
      })
      .collect()
  }
}

/// Resolve both compilers against `toolchain`.
pub fn resolve_compilers(overrides: &CompilerOverrides, toolchain: &Toolchain) -> ResolvedCompilerSet {
  let mut resolved = ResolvedCompilerSet::default();

  for language in [Language::C, Language::Cxx] {
    let default_path = language.default_path(toolchain);
    let choice = match pick_compiler(overrides.get(language), &default_path, language) {
      Ok(choice) => choice,
      Err(warning) => {
        warn!(language = language.label(), path = %warning.path.display(), "{}", warning);
        resolved.warnings.push(warning);
        None
      }
    };

    match language {
      Language::C => resolved.cc = choice,
      Language::Cxx => resolved.cxx = choice,
    }
  }

  resolved
}

fn pick_compiler(
  explicit: Option<&Path>,
  default_path: &Path,
  language: Language,
) -> Result<Option<PathBuf>, CompilerWarning> {
  if let Some(path) = explicit {
    if is_executable(path) {
      debug!(language = language.label(), path = %path.display(), "using explicit compiler");
      return Ok(Some(path.to_path_buf()));
    }
    return Err(CompilerWarning {
      language,
      path: path.to_path_buf(),
    });
  }

  if is_executable(default_path) {
    debug!(language = language.label(), path = %default_path.display(), "using toolchain compiler");
    return Ok(Some(default_path.to_path_buf()));
  }

  debug!(
    language = language.label(),
    path = %default_path.display(),
    "toolchain compiler not found, deferring to CMake"
  );
  Ok(None)
}
