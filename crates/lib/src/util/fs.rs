use std::path::Path;

/// True when `path` is a regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
  use rustix::fs::{Access, access};

  path.is_file() && access(path, Access::EXEC_OK).is_ok()
}

/// True when `path` is a regular file; Windows has no execute bit to check.
#[cfg(windows)]
pub fn is_executable(path: &Path) -> bool {
  path.is_file()
}
