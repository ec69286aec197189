//! Content-aware file copy.
//!
//! Not used by the build pipeline itself; available for post-install steps that
//! should leave unchanged files (and their timestamps) alone.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Copy `src` to `dst` unless `dst` already holds identical bytes.
///
/// Returns `true` when a copy was made. If `dst` exists but cannot be compared,
/// it is overwritten.
pub fn copy_if_different(src: &Path, dst: &Path) -> io::Result<bool> {
  if dst.exists() {
    match same_contents(src, dst) {
      Ok(true) => {
        debug!(src = %src.display(), dst = %dst.display(), "destination up to date");
        return Ok(false);
      }
      Ok(false) => {}
      Err(e) => debug!(dst = %dst.display(), error = %e, "could not compare, copying"),
    }
  }

  std::fs::copy(src, dst)?;
  debug!(src = %src.display(), dst = %dst.display(), "copied");
  Ok(true)
}

fn same_contents(a: &Path, b: &Path) -> io::Result<bool> {
  let a_file = File::open(a)?;
  let b_file = File::open(b)?;
  if a_file.metadata()?.len() != b_file.metadata()?.len() {
    return Ok(false);
  }

  let mut a_reader = BufReader::new(a_file);
  let mut b_reader = BufReader::new(b_file);
  let mut a_buf = vec![0u8; CHUNK_SIZE];
  let mut b_buf = vec![0u8; CHUNK_SIZE];

  loop {
    let read = fill(&mut a_reader, &mut a_buf)?;
    if read != fill(&mut b_reader, &mut b_buf)? || a_buf[..read] != b_buf[..read] {
      return Ok(false);
    }
    if read == 0 {
      return Ok(true);
    }
  }
}

/// Read until `buf` is full or EOF.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match reader.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn copies_when_destination_missing() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.h");
    let dst = temp.path().join("dst.h");
    fs::write(&src, "#pragma once\n").unwrap();

    assert!(copy_if_different(&src, &dst).unwrap());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "#pragma once\n");
  }

  #[test]
  fn leaves_identical_destination_untouched() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.h");
    let dst = temp.path().join("dst.h");
    fs::write(&src, "same").unwrap();
    fs::write(&dst, "same").unwrap();
    let before = fs::metadata(&dst).unwrap().modified().unwrap();

    assert!(!copy_if_different(&src, &dst).unwrap());
    assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), before);
  }

  #[test]
  fn overwrites_when_contents_differ_with_equal_length() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.h");
    let dst = temp.path().join("dst.h");
    fs::write(&src, "abcd").unwrap();
    fs::write(&dst, "abce").unwrap();

    assert!(copy_if_different(&src, &dst).unwrap());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "abcd");
  }

  #[test]
  fn compares_files_larger_than_one_chunk() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("big.a");
    let dst = temp.path().join("big-copy.a");
    let mut data = vec![7u8; CHUNK_SIZE * 2 + 13];
    fs::write(&src, &data).unwrap();
    fs::write(&dst, &data).unwrap();
    assert!(!copy_if_different(&src, &dst).unwrap());

    *data.last_mut().unwrap() = 8;
    fs::write(&dst, &data).unwrap();
    assert!(copy_if_different(&src, &dst).unwrap());
    assert_eq!(fs::read(&dst).unwrap(), fs::read(&src).unwrap());
  }

  #[test]
  fn missing_source_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = copy_if_different(&temp.path().join("missing"), &temp.path().join("dst"));
    assert!(result.is_err());
  }
}
