//! Paths derived from an Xcode installation.
//!
//! Everything here is pure path arithmetic; nothing touches the filesystem.

use std::path::PathBuf;

use crate::platform::Platform;

const DEVELOPER_DIR: &str = "Contents/Developer";
const DEFAULT_TOOLCHAIN_BIN: &str = "Toolchains/XcodeDefault.xctoolchain/usr/bin";

/// An Xcode.app root, e.g. `/Applications/Xcode.app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  root: PathBuf,
}

impl Toolchain {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn developer_dir(&self) -> PathBuf {
    self.root.join(DEVELOPER_DIR)
  }

  /// Default `clang` shipped with the toolchain.
  pub fn default_cc(&self) -> PathBuf {
    self.developer_dir().join(DEFAULT_TOOLCHAIN_BIN).join("clang")
  }

  /// Default `clang++` shipped with the toolchain.
  pub fn default_cxx(&self) -> PathBuf {
    self.developer_dir().join(DEFAULT_TOOLCHAIN_BIN).join("clang++")
  }

  /// SDK root for platforms that need an explicit sysroot.
  ///
  /// Returns `None` for [`Platform::Desktop`], which builds against the host SDK.
  pub fn sdk_path(&self, platform: Platform) -> Option<PathBuf> {
    let sdk = platform.sdk_dir_name()?;
    Some(
      self
        .developer_dir()
        .join("Platforms")
        .join(format!("{}.platform", sdk))
        .join("Developer/SDKs")
        .join(format!("{}.sdk", sdk)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_compilers_live_in_xcode_default_toolchain() {
    let toolchain = Toolchain::new("/Applications/Xcode.app");
    assert_eq!(
      toolchain.default_cc(),
      PathBuf::from("/Applications/Xcode.app/Contents/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin/clang")
    );
    assert_eq!(
      toolchain.default_cxx(),
      PathBuf::from("/Applications/Xcode.app/Contents/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin/clang++")
    );
  }

  #[test]
  fn sdk_paths_per_platform() {
    let toolchain = Toolchain::new("/Xcode.app");
    assert_eq!(
      toolchain.sdk_path(Platform::Device),
      Some(PathBuf::from(
        "/Xcode.app/Contents/Developer/Platforms/iPhoneOS.platform/Developer/SDKs/iPhoneOS.sdk"
      ))
    );
    assert_eq!(
      toolchain.sdk_path(Platform::Simulator),
      Some(PathBuf::from(
        "/Xcode.app/Contents/Developer/Platforms/iPhoneSimulator.platform/Developer/SDKs/iPhoneSimulator.sdk"
      ))
    );
    assert_eq!(toolchain.sdk_path(Platform::Desktop), None);
  }
}
