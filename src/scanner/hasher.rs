//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! The [`Hasher`] reads a file through a fixed-size buffer and feeds it to
//! SHA-256, so memory use does not grow with file size. The digest is
//! rendered as a 64-character lowercase hex [`Fingerprint`].
//!
//! Any failure (file vanished, permission denied, read error) comes back as
//! a [`HashError`]; callers treat it as a per-file skip.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! match hasher.hash(Path::new("photo.jpg")) {
//!     Ok(outcome) => println!("{} ({} bytes)", outcome.fingerprint, outcome.bytes),
//!     Err(e) => eprintln!("Skipping: {}", e),
//! }
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::HashError;

/// Default read buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 digest of a file's full content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 64;

    fn from_digest(digest: Sha256) -> Self {
        Self(format!("{:x}", digest.finalize()))
    }

    /// The hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` hex characters, for compact listings.
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of hashing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOutcome {
    /// Content fingerprint
    pub fingerprint: Fingerprint,
    /// Number of bytes read
    pub bytes: u64,
}

/// Streaming SHA-256 file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default 64 KiB buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a hasher with a custom read buffer size (clamped to at least 1 byte).
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Hash the entire content of the file at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file vanished before it could be opened
    /// - `PermissionDenied` if it cannot be read
    /// - `Io` for any other open or mid-read failure
    pub fn hash(&self, path: &Path) -> Result<HashOutcome, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let outcome = self
            .hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))?;

        log::trace!("Hashed {} ({} bytes)", path.display(), outcome.bytes);
        Ok(outcome)
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first non-`Interrupted` I/O error from the reader.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<HashOutcome> {
        let mut digest = Sha256::new();
        let mut buffer = vec![0u8; self.buffer_size];
        let mut bytes = 0u64;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digest.update(&buffer[..n]);
            bytes += n as u64;
        }

        Ok(HashOutcome {
            fingerprint: Fingerprint::from_digest(digest),
            bytes,
        })
    }
}

/// Fingerprint of an in-memory byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> Fingerprint {
    let mut digest = Sha256::new();
    digest.update(data);
    Fingerprint::from_digest(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    // SHA-256("hello")
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
    // SHA-256("")
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_hash_known_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, b"hello").unwrap();

        let outcome = Hasher::new().hash(&path).unwrap();

        assert_eq!(outcome.fingerprint.as_str(), HELLO_SHA256);
        assert_eq!(outcome.bytes, 5);
    }

    #[test]
    fn test_hash_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let outcome = Hasher::new().hash(&path).unwrap();

        assert_eq!(outcome.fingerprint.as_str(), EMPTY_SHA256);
        assert_eq!(outcome.bytes, 0);
    }

    #[test]
    fn test_fingerprint_is_lowercase_fixed_width() {
        let fp = hash_bytes(b"some bytes");
        assert_eq!(fp.as_str().len(), Fingerprint::HEX_LEN);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_small_buffer_matches_default() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let small = Hasher::with_buffer_size(7).hash_reader(&data[..]).unwrap();
        let default = Hasher::new().hash_reader(&data[..]).unwrap();

        assert_eq!(small, default);
        assert_eq!(small.fingerprint, hash_bytes(&data));
    }

    #[test]
    fn test_zero_buffer_size_is_clamped() {
        let outcome = Hasher::with_buffer_size(0).hash_reader(&b"hello"[..]).unwrap();
        assert_eq!(outcome.fingerprint.as_str(), HELLO_SHA256);
    }

    #[test]
    fn test_hash_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");

        let err = Hasher::new().hash(&path).unwrap_err();

        assert!(matches!(err, HashError::NotFound(ref p) if p == &path));
    }

    #[test]
    fn test_hash_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        // Opening succeeds on Unix but reading a directory fails.
        let result = Hasher::new().hash(dir.path());
        assert!(result.is_err());
    }

    /// Reader that fails after yielding some data.
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                Err(io::Error::other("device went away"))
            } else {
                self.served = true;
                buf[0] = b'x';
                Ok(1)
            }
        }
    }

    #[test]
    fn test_mid_read_error_propagates() {
        let result = Hasher::new().hash_reader(FailingReader { served: false });
        assert!(result.is_err());
    }

    /// Reader that reports `Interrupted` once before serving data.
    struct InterruptedOnce {
        interrupted: bool,
        data: &'static [u8],
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let reader = InterruptedOnce {
            interrupted: false,
            data: b"hello",
        };
        let outcome = Hasher::new().hash_reader(reader).unwrap();
        assert_eq!(outcome.fingerprint.as_str(), HELLO_SHA256);
    }

    #[test]
    fn test_fingerprint_short() {
        let fp = hash_bytes(b"hello");
        assert_eq!(fp.short(8), "2cf24dba");
        assert_eq!(fp.short(1000), HELLO_SHA256);
    }
}
