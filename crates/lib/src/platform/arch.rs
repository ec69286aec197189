use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Returned when an architecture spec contains no tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchError {
  #[error("architecture list is empty (got {spec:?}); pass at least one architecture, e.g. \"arm64\"")]
  Empty { spec: String },
}

/// Ordered, de-duplicated list of architecture tokens (e.g. `arm64`, `x86_64`).
///
/// Tokens keep the order in which they were first seen. The list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArchList(Vec<String>);

impl ArchList {
  /// Parse a free-form spec using commas, semicolons or whitespace as separators.
  ///
  /// Empty tokens are dropped and repeated tokens keep their first position.
  pub fn parse(spec: &str) -> Result<Self, ArchError> {
    let mut archs: Vec<String> = Vec::new();
    for token in spec.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
      if token.is_empty() || archs.iter().any(|seen| seen == token) {
        continue;
      }
      archs.push(token.to_string());
    }

    if archs.is_empty() {
      return Err(ArchError::Empty { spec: spec.to_string() });
    }
    Ok(Self(archs))
  }

  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  /// The form CMake expects for `CMAKE_OSX_ARCHITECTURES`.
  pub fn joined(&self) -> String {
    self.0.join(";")
  }
}

impl fmt::Display for ArchList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.joined())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_comma_and_space_separated() {
    let archs = ArchList::parse("arm64, x86_64").unwrap();
    assert_eq!(archs.as_slice(), ["arm64", "x86_64"]);
    assert_eq!(archs.joined(), "arm64;x86_64");
  }

  #[test]
  fn removes_duplicates_keeping_first_seen_order() {
    let archs = ArchList::parse("x86_64;arm64 , x86_64\tarm64;;arm64e,x86_64").unwrap();
    assert_eq!(archs.as_slice(), ["x86_64", "arm64", "arm64e"]);
  }

  #[test]
  fn does_not_sort_tokens() {
    let archs = ArchList::parse("x86_64 arm64").unwrap();
    assert_eq!(archs.joined(), "x86_64;arm64");
  }

  #[test]
  fn normalizing_joined_output_is_idempotent() {
    for spec in ["arm64", "arm64, x86_64", " x86_64;;arm64  arm64 ", "a,b;c d\ne"] {
      let once = ArchList::parse(spec).unwrap();
      let twice = ArchList::parse(&once.joined()).unwrap();
      assert_eq!(once, twice, "spec {:?}", spec);
    }
  }

  #[test]
  fn empty_spec_is_rejected() {
    for spec in ["", "   ", ",;, ;", "\t\n"] {
      let err = ArchList::parse(spec).unwrap_err();
      assert_eq!(err, ArchError::Empty { spec: spec.to_string() });
    }
  }

  #[test]
  fn serializes_as_plain_list() {
    let archs = ArchList::parse("arm64,x86_64").unwrap();
    assert_eq!(serde_json::to_string(&archs).unwrap(), r#"["arm64","x86_64"]"#);
  }
}
