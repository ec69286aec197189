//! Fixed names and defaults shared by the library and the CLI.

pub const APP_NAME: &str = "applebuild";

/// CMake target built by the build phase.
pub const LIBRARY_TARGET: &str = "msquic_lib";

/// File name of the static library expected under `<dist>/lib`.
pub const LIBRARY_ARTIFACT: &str = "libmsquic.a";

pub const C_COMPILER_ENV: &str = "MSQUIC_C_COMPILER";
pub const CXX_COMPILER_ENV: &str = "MSQUIC_CXX_COMPILER";

pub const DEFAULT_CMAKE: &str = "/opt/homebrew/bin/cmake";
pub const DEFAULT_PACKAGE_ROOT: &str = "./dependencies/msquic";
pub const DEFAULT_XCODE_PATH: &str = "/Applications/Xcode.app";
pub const DEFAULT_GENERATOR: &str = "Ninja";
pub const DEFAULT_MAKE_PROGRAM: &str = "ninja";

pub const IOS_DEPLOYMENT_TARGET: &str = "14.0";
pub const MACOS_DEPLOYMENT_TARGET: &str = "11.0";
