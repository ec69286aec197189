//! applebuild-lib: cross-compilation planning for Apple platforms
//!
//! This crate turns a handful of user parameters into a CMake invocation that
//! produces a static library for iOS devices, the iOS simulator, or macOS:
//! - `platform`: the closed set of targets, architecture lists, and per-platform cache entries
//! - `compiler`: C/C++ compiler selection with soft-failing overrides
//! - `execute`: the configure → build → install pipeline and its post-condition check
//! - `util`: content-aware copying and filesystem helpers

pub mod compiler;
pub mod consts;
pub mod execute;
pub mod platform;
pub mod toolchain;
pub mod util;
