//! Per-platform CMake cache entries.

use std::ffi::{OsStr, OsString};
use std::fmt;

use serde::Serialize;

use crate::platform::Platform;
use crate::platform::arch::ArchList;
use crate::toolchain::Toolchain;
use crate::util::lossy;

/// A single `-D<key>=<value>` cache entry.
///
/// Values are OS strings so path values keep their exact bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
  pub key: String,
  #[serde(serialize_with = "lossy::serialize")]
  pub value: OsString,
}

impl CacheEntry {
  pub fn new(key: impl Into<String>, value: impl Into<OsString>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }

  /// Render as a CMake command-line definition.
  pub fn to_arg(&self) -> OsString {
    let mut arg = OsString::from(format!("-D{}=", self.key));
    arg.push(&self.value);
    arg
  }
}

impl fmt::Display for CacheEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "-D{}={}", self.key, self.value.to_string_lossy())
  }
}

/// Ordered block of platform cache entries appended last to the configure step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlatformConfig {
  entries: Vec<CacheEntry>,
}

impl PlatformConfig {
  /// Build the configuration block for `platform`.
  ///
  /// | platform  | CMAKE_SYSTEM_NAME | SDK_NAME        | DEPLOYMENT_TARGET | CMAKE_OSX_SYSROOT |
  /// |-----------|-------------------|-----------------|-------------------|-------------------|
  /// | device    | iOS               | iphoneos        | 14.0              | iPhoneOS.sdk      |
  /// | simulator | iOS               | iphonesimulator | 14.0              | iPhoneSimulator.sdk |
  /// | desktop   | -                 | macosx          | 11.0              | -                 |
  ///
  /// `CMAKE_OSX_ARCHITECTURES` is always the last entry.
  pub fn derive(platform: Platform, archs: &ArchList, toolchain: &Toolchain) -> Self {
    let mut entries = Vec::with_capacity(5);

    if let Some(system_name) = platform.system_name() {
      entries.push(CacheEntry::new("CMAKE_SYSTEM_NAME", system_name));
    }
    entries.push(CacheEntry::new("SDK_NAME", platform.sdk_name()));
    entries.push(CacheEntry::new("DEPLOYMENT_TARGET", platform.deployment_target()));
    if let Some(sdk_path) = toolchain.sdk_path(platform) {
      entries.push(CacheEntry::new("CMAKE_OSX_SYSROOT", sdk_path));
    }
    entries.push(CacheEntry::new("CMAKE_OSX_ARCHITECTURES", archs.joined()));

    Self { entries }
  }

  pub fn entries(&self) -> &[CacheEntry] {
    &self.entries
  }

  /// Look up the value of `key`, if present.
  pub fn get(&self, key: &str) -> Option<&OsStr> {
    self
      .entries
      .iter()
      .find(|entry| entry.key == key)
      .map(|entry| entry.value.as_os_str())
  }

  pub fn to_args(&self) -> Vec<OsString> {
    self.entries.iter().map(CacheEntry::to_arg).collect()
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  fn xcode() -> Toolchain {
    Toolchain::new("/Applications/Xcode.app")
  }

  #[test]
  fn device_block() {
    let archs = ArchList::parse("arm64").unwrap();
    let config = PlatformConfig::derive(Platform::Device, &archs, &xcode());
    assert_eq!(
      config.to_args(),
      vec![
        "-DCMAKE_SYSTEM_NAME=iOS",
        "-DSDK_NAME=iphoneos",
        "-DDEPLOYMENT_TARGET=14.0",
        "-DCMAKE_OSX_SYSROOT=/Applications/Xcode.app/Contents/Developer/Platforms/iPhoneOS.platform/Developer/SDKs/iPhoneOS.sdk",
        "-DCMAKE_OSX_ARCHITECTURES=arm64",
      ]
    );
  }

  #[test]
  fn simulator_block() {
    let archs = ArchList::parse("arm64 x86_64").unwrap();
    let config = PlatformConfig::derive(Platform::Simulator, &archs, &xcode());
    assert_eq!(config.get("CMAKE_SYSTEM_NAME"), Some(OsStr::new("iOS")));
    assert_eq!(config.get("SDK_NAME"), Some(OsStr::new("iphonesimulator")));
    assert_eq!(config.get("DEPLOYMENT_TARGET"), Some(OsStr::new("14.0")));
    let sysroot = Path::new(config.get("CMAKE_OSX_SYSROOT").unwrap());
    assert!(sysroot.ends_with("iPhoneSimulator.platform/Developer/SDKs/iPhoneSimulator.sdk"));
    assert_eq!(config.get("CMAKE_OSX_ARCHITECTURES"), Some(OsStr::new("arm64;x86_64")));
  }

  #[test]
  fn desktop_block_has_no_system_name_or_sysroot() {
    let archs = ArchList::parse("arm64, x86_64").unwrap();
    let config = PlatformConfig::derive(Platform::Desktop, &archs, &xcode());
    assert_eq!(
      config.to_args(),
      vec![
        "-DSDK_NAME=macosx",
        "-DDEPLOYMENT_TARGET=11.0",
        "-DCMAKE_OSX_ARCHITECTURES=arm64;x86_64",
      ]
    );
  }

  #[test]
  fn architectures_entry_is_last_for_every_platform() {
    let archs = ArchList::parse("arm64").unwrap();
    for platform in Platform::ALL {
      let config = PlatformConfig::derive(platform, &archs, &xcode());
      let last = config.entries().last().unwrap();
      assert_eq!(last.key, "CMAKE_OSX_ARCHITECTURES");
    }
  }

  #[test]
  fn derivation_is_deterministic() {
    let archs = ArchList::parse("x86_64,arm64").unwrap();
    for platform in Platform::ALL {
      let a = PlatformConfig::derive(platform, &archs, &xcode());
      let b = PlatformConfig::derive(platform, &archs.clone(), &xcode());
      assert_eq!(a, b);
    }
  }

  #[test]
  #[cfg(unix)]
  fn sysroot_keeps_non_utf8_toolchain_bytes() {
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new(OsStr::from_bytes(b"/Volumes/X\xFFcode.app"));
    let toolchain = Toolchain::new(root);
    let archs = ArchList::parse("arm64").unwrap();
    let config = PlatformConfig::derive(Platform::Device, &archs, &toolchain);

    let sysroot = Path::new(config.get("CMAKE_OSX_SYSROOT").unwrap());
    assert!(sysroot.starts_with(root));
    let arg = config.entries().iter().find(|e| e.key == "CMAKE_OSX_SYSROOT").unwrap().to_arg();
    assert!(arg.as_encoded_bytes().starts_with(b"-DCMAKE_OSX_SYSROOT=/Volumes/X\xFFcode.app/"));
  }
}
