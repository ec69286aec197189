pub mod arch;
pub mod config;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{IOS_DEPLOYMENT_TARGET, MACOS_DEPLOYMENT_TARGET};

/// A value that does not name a known variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?} (expected one of: {expected})")]
pub struct ParseVariantError {
  kind: &'static str,
  value: String,
  expected: &'static str,
}

/// Apple platform a library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  /// Physical iOS devices.
  Device,
  /// The iOS simulator.
  Simulator,
  /// Native macOS.
  Desktop,
}

impl Platform {
  pub const ALL: [Platform; 3] = [Platform::Device, Platform::Simulator, Platform::Desktop];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Device => "device",
      Self::Simulator => "simulator",
      Self::Desktop => "desktop",
    }
  }

  /// Value for `CMAKE_SYSTEM_NAME`; the desktop build is native and leaves it unset.
  pub fn system_name(&self) -> Option<&'static str> {
    match self {
      Self::Device | Self::Simulator => Some("iOS"),
      Self::Desktop => None,
    }
  }

  /// SDK identifier as understood by `xcrun --sdk`.
  pub fn sdk_name(&self) -> &'static str {
    match self {
      Self::Device => "iphoneos",
      Self::Simulator => "iphonesimulator",
      Self::Desktop => "macosx",
    }
  }

  /// Directory stem of the platform and SDK bundles inside Xcode.
  pub(crate) fn sdk_dir_name(&self) -> Option<&'static str> {
    match self {
      Self::Device => Some("iPhoneOS"),
      Self::Simulator => Some("iPhoneSimulator"),
      Self::Desktop => None,
    }
  }

  pub fn deployment_target(&self) -> &'static str {
    match self {
      Self::Device | Self::Simulator => IOS_DEPLOYMENT_TARGET,
      Self::Desktop => MACOS_DEPLOYMENT_TARGET,
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Platform {
  type Err = ParseVariantError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "device" | "ios" | "iphoneos" => Ok(Self::Device),
      "simulator" | "iphonesimulator" => Ok(Self::Simulator),
      "desktop" | "macos" | "macosx" => Ok(Self::Desktop),
      _ => Err(ParseVariantError {
        kind: "platform",
        value: s.to_string(),
        expected: "device, simulator, desktop",
      }),
    }
  }
}

/// CMake build type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Configuration {
  Debug,
  #[default]
  Release,
}

impl Configuration {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Configuration {
  type Err = ParseVariantError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Debug" => Ok(Self::Debug),
      "Release" => Ok(Self::Release),
      _ => Err(ParseVariantError {
        kind: "configuration",
        value: s.to_string(),
        expected: "Debug, Release",
      }),
    }
  }
}
