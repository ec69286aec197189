//! Test utilities for applebuild-lib.
//!
//! Helpers that lay out fake toolchains and build engines in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::toolchain::Toolchain;

/// Write a file with the execute bit set.
pub fn write_executable(dir: &Path, name: &str) -> PathBuf {
  write_script(dir, name, "#!/bin/sh\nexit 0\n")
}

/// Write a shell script with the execute bit set.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, body).unwrap();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  }
  path
}

/// Write a regular, non-executable file.
pub fn write_plain_file(dir: &Path, name: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, "not a program").unwrap();
  path
}

/// Create an `Xcode.app` under `dir` whose default clang and clang++ are executable.
pub fn fake_xcode(dir: &Path) -> Toolchain {
  let toolchain = Toolchain::new(dir.join("Xcode.app"));
  for compiler in [toolchain.default_cc(), toolchain.default_cxx()] {
    let parent = compiler.parent().unwrap();
    let name = compiler.file_name().unwrap().to_str().unwrap();
    write_executable(parent, name);
  }
  toolchain
}
