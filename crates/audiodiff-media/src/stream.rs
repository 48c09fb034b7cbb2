//! Audio stream digests.
//!
//! A file is decoded by `ffmpeg` into signed 24-bit little-endian PCM and
//! the raw stream is hashed with BLAKE3 as it arrives. Two files have equal
//! streams iff their PCM bytes are identical, which is iff their digests
//! match. Lossy formats may decode differently across platforms and
//! decoder versions.

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::{MediaError, MediaResult};

const CHUNK_SIZE: usize = 64 * 1024;

/// BLAKE3 digest of a canonical PCM stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamDigest([u8; 32]);

impl StreamDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Digest of an in-memory PCM buffer.
    pub fn of(pcm: &[u8]) -> Self {
        Self(*blake3::hash(pcm).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for StreamDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StreamDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamDigest({})", self)
    }
}

/// Source of canonical audio streams.
pub trait StreamDecoder {
    /// Decode `path` and return the digest of its canonical PCM stream.
    fn decode(&self, path: &Path) -> MediaResult<StreamDigest>;

    /// Returns `true` if both files decode to the same PCM stream.
    fn streams_equal(&self, left: &Path, right: &Path) -> MediaResult<bool> {
        Ok(self.decode(left)? == self.decode(right)?)
    }
}

/// Stream a reader through BLAKE3. Returns `None` if it yielded no bytes.
pub fn digest_reader(mut reader: impl Read) -> io::Result<Option<StreamDigest>> {
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let count = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..count]);
        total += count as u64;
    }

    if total == 0 {
        return Ok(None);
    }
    Ok(Some(StreamDigest(*hasher.finalize().as_bytes())))
}

/// Decodes through an external `ffmpeg` executable.
#[derive(Clone, Debug)]
pub struct FfmpegDecoder {
    bin: PathBuf,
}

impl FfmpegDecoder {
    /// Executable looked up on `PATH` when no path is configured.
    pub const DEFAULT_BIN: &'static str = "ffmpeg";

    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Arguments decoding `path` to s24le PCM on stdout, video dropped.
    pub fn args(&self, path: &Path) -> Vec<OsString> {
        vec![
            "-nostdin".into(),
            "-i".into(),
            path.as_os_str().to_owned(),
            "-vn".into(),
            "-f".into(),
            "s24le".into(),
            "-".into(),
        ]
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BIN)
    }
}

impl StreamDecoder for FfmpegDecoder {
    fn decode(&self, path: &Path) -> MediaResult<StreamDigest> {
        // Unreadable input is an I/O error, not a decoder failure.
        File::open(path).map_err(|e| MediaError::io(path, e))?;

        debug!(bin = %self.bin.display(), path = %path.display(), "decoding audio stream");
        let mut child = Command::new(&self.bin)
            .args(self.args(path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                MediaError::external_tool(path, format!("cannot run {}: {}", self.bin.display(), e))
            })?;

        // Drain stderr concurrently so a verbose decoder cannot fill the pipe
        // while stdout is being read.
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)
                    .map(|_| String::from_utf8_lossy(&buf).into_owned())
                    .unwrap_or_default()
            })
        });

        let digest = match child.stdout.take() {
            Some(stdout) => digest_reader(stdout),
            None => Ok(None),
        };
        let status = child.wait().map_err(|e| MediaError::io(path, e))?;
        let stderr = stderr.and_then(|h| h.join().ok()).unwrap_or_default();
        let digest = digest.map_err(|e| MediaError::io(path, e))?;

        match digest {
            Some(digest) if status.success() => {
                debug!(path = %path.display(), %digest, "decoded audio stream");
                Ok(digest)
            }
            _ => {
                let message = stderr.trim();
                let message = if message.is_empty() {
                    format!("{} produced no audio ({})", self.bin.display(), status)
                } else {
                    message.to_string()
                };
                Err(MediaError::external_tool(path, message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = digest_reader(&b"pcm data"[..]).unwrap().unwrap();
        let b = digest_reader(&b"pcm data"[..]).unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, StreamDigest::of(b"pcm data"));
    }

    #[test]
    fn different_streams_differ() {
        let a = digest_reader(&b"left"[..]).unwrap();
        let b = digest_reader(&b"right"[..]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_stream_has_no_digest() {
        assert_eq!(digest_reader(&b""[..]).unwrap(), None);
    }

    #[test]
    fn large_stream_spans_chunks() {
        let data = vec![7u8; CHUNK_SIZE * 3 + 11];
        let digest = digest_reader(&data[..]).unwrap().unwrap();
        assert_eq!(digest, StreamDigest::of(&data));
    }

    #[test]
    fn display_is_hex() {
        let digest = StreamDigest::from_bytes([0xab; 32]);
        assert_eq!(digest.to_string(), "ab".repeat(32));
    }

    #[test]
    fn ffmpeg_arguments() {
        let decoder = FfmpegDecoder::default();
        assert_eq!(decoder.bin(), Path::new("ffmpeg"));
        let args = decoder.args(Path::new("x/a.flac"));
        let args: Vec<&str> = args.iter().filter_map(|a| a.to_str()).collect();
        assert_eq!(args, ["-nostdin", "-i", "x/a.flac", "-vn", "-f", "s24le", "-"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let decoder = FfmpegDecoder::default();
        let err = decoder.decode(Path::new("/nonexistent/audiodiff/a.flac")).unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }

    #[test]
    fn missing_decoder_is_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.flac");
        std::fs::write(&file, b"not really flac").unwrap();

        let decoder = FfmpegDecoder::new(dir.path().join("no-such-ffmpeg"));
        let err = decoder.decode(&file).unwrap_err();
        assert!(matches!(err, MediaError::ExternalTool { .. }));
    }
}
