//! Whole-file byte comparison.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{MediaError, MediaResult};

const CHUNK_SIZE: usize = 64 * 1024;

/// Returns `true` if both files have byte-identical content.
///
/// Sizes are checked first; contents are then compared chunk by chunk.
/// Failing to open or read either file is an error, never a difference.
pub fn files_equal(left: &Path, right: &Path) -> MediaResult<bool> {
    let left_file = File::open(left).map_err(|e| MediaError::io(left, e))?;
    let right_file = File::open(right).map_err(|e| MediaError::io(right, e))?;

    let left_len = left_file.metadata().map_err(|e| MediaError::io(left, e))?.len();
    let right_len = right_file.metadata().map_err(|e| MediaError::io(right, e))?.len();
    if left_len != right_len {
        return Ok(false);
    }

    let mut left_reader = BufReader::new(left_file);
    let mut right_reader = BufReader::new(right_file);
    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = fill(&mut left_reader, &mut left_buf).map_err(|e| MediaError::io(left, e))?;
        let m = fill(&mut right_reader, &mut right_buf).map_err(|e| MediaError::io(right, e))?;
        if n != m || left_buf[..n] != right_buf[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or the reader is exhausted.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"same content").unwrap();
        fs::write(&b, b"same content").unwrap();
        assert!(files_equal(&a, &b).unwrap());
    }

    #[test]
    fn same_size_different_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"cat").unwrap();
        fs::write(&b, b"dog").unwrap();
        assert!(!files_equal(&a, &b).unwrap());
    }

    #[test]
    fn different_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"short").unwrap();
        fs::write(&b, b"much longer").unwrap();
        assert!(!files_equal(&a, &b).unwrap());
    }

    #[test]
    fn difference_past_first_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let mut data = vec![1u8; CHUNK_SIZE * 2 + 5];
        fs::write(&a, &data).unwrap();
        data[CHUNK_SIZE + 3] = 2;
        fs::write(&b, &data).unwrap();
        assert!(!files_equal(&a, &b).unwrap());
    }

    #[test]
    fn empty_files_are_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();
        assert!(files_equal(&a, &b).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        fs::write(&a, b"x").unwrap();
        let err = files_equal(&a, &dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }
}
