//! Serialize OS strings for display-only output such as the dry-run plan.
//!
//! The bytes handed to subprocesses are never altered; only the JSON rendering
//! replaces invalid UTF-8 with U+FFFD.

use std::ffi::OsStr;

use serde::Serializer;

pub(crate) fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
  T: AsRef<OsStr> + ?Sized,
{
  serializer.serialize_str(&value.as_ref().to_string_lossy())
}

pub(crate) fn serialize_all<S, T>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
  T: AsRef<OsStr>,
{
  serializer.collect_seq(values.iter().map(|value| value.as_ref().to_string_lossy()))
}
