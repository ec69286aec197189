//! Shared utilities.
//!
//! Filesystem helpers used across the crate, plus test helpers.

pub mod copy;
pub mod fs;
pub(crate) mod lossy;

#[cfg(test)]
pub mod testutil;
