//! Full-content BLAKE3 comparison.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use mirrorsync_core::{ContentComparator, DEFAULT_CHUNK_SIZE, FolderSettings, SyncError};

/// BLAKE3 digest of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Compute the digest of `path`, reading `chunk_size` bytes at a time.
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<ContentHash, SyncError> {
    let mut file = File::open(path).map_err(|e| SyncError::io(path, e))?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SyncError::io(path, e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

/// Treats a file as changed when the digests of both copies differ.
#[derive(Debug, Clone)]
pub struct DigestComparator {
    source: PathBuf,
    destination: PathBuf,
    chunk_size: usize,
}

impl DigestComparator {
    /// Create a comparator over the given roots with the default chunk size.
    pub fn new(settings: &FolderSettings) -> Self {
        Self {
            source: settings.source.clone(),
            destination: settings.destination.clone(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the read buffer size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl ContentComparator for DigestComparator {
    fn differs(&self, common_root: &str, name: &str) -> Result<bool, SyncError> {
        let source = hash_file(&self.source.join(common_root).join(name), self.chunk_size)?;
        let destination =
            hash_file(&self.destination.join(common_root).join(name), self.chunk_size)?;

        let differs = source != destination;
        tracing::debug!(
            common_root,
            name,
            differs,
            source_hash = %source.to_hex(),
            "Compared content digests"
        );
        Ok(differs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file_matches_one_shot_hash() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &content).unwrap();

        let streamed = hash_file(&path, 4096).unwrap();
        assert_eq!(streamed.0, *blake3::hash(&content).as_bytes());
    }

    #[test]
    fn test_chunk_size_does_not_change_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        fs::write(&path, vec![7u8; 100_003]).unwrap();

        let small = hash_file(&path, 7).unwrap();
        let large = hash_file(&path, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn test_empty_file_hash() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        fs::write(&path, b"").unwrap();

        let hash = hash_file(&path, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(hash.0, *blake3::hash(b"").as_bytes());
        assert_eq!(hash.to_hex().len(), 64);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = hash_file(&temp.path().join("missing"), DEFAULT_CHUNK_SIZE).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
