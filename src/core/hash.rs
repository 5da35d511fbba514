// ─── File hashing ───
// Streaming digests of mod jars. The registry is keyed by file hash,
// so these hex strings are the only thing ever sent over the wire.

use std::path::Path;

use sha1::{Digest, Sha1};
use sha2::Sha512;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::core::error::{SorterError, SorterResult};

/// Digest algorithms accepted by the registry's hash-lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// Primary lookup key.
    Sha1,
    /// Fallback when the SHA-1 is unknown to the registry.
    Sha512,
}

impl HashAlgorithm {
    /// Wire name used in the lookup query string.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jar files can be large; read them in fixed chunks, never whole.
const CHUNK_SIZE: usize = 8 * 1024;

/// Compute the lowercase hex digest of a file, streaming chunk by chunk.
///
/// Output is identical to a one-pass digest of the full contents.
pub async fn digest_file(path: &Path, algorithm: HashAlgorithm) -> SorterResult<String> {
    let file = File::open(path).await.map_err(|source| SorterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match algorithm {
        HashAlgorithm::Sha1 => stream_digest::<Sha1>(file, path).await,
        HashAlgorithm::Sha512 => stream_digest::<Sha512>(file, path).await,
    }
}

async fn stream_digest<D: Digest>(mut file: File, path: &Path) -> SorterResult<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buf).await.map_err(|source| SorterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_and_digest(bytes: &[u8], algorithm: HashAlgorithm) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.jar");
        std::fs::write(&path, bytes).unwrap();
        digest_file(&path, algorithm).await.unwrap()
    }

    #[tokio::test]
    async fn streaming_matches_one_pass_at_chunk_boundaries() {
        // Empty file, single byte, exactly one chunk, several chunks
        // plus a remainder.
        for len in [0usize, 1, CHUNK_SIZE, CHUNK_SIZE * 3 + 17] {
            let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

            let streamed = write_and_digest(&bytes, HashAlgorithm::Sha1).await;
            let one_pass = hex::encode(Sha1::digest(&bytes));
            assert_eq!(streamed, one_pass, "length {len}");
        }
    }

    #[tokio::test]
    async fn known_sha1_vectors() {
        assert_eq!(
            write_and_digest(b"", HashAlgorithm::Sha1).await,
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            write_and_digest(b"abc", HashAlgorithm::Sha1).await,
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[tokio::test]
    async fn known_sha512_vectors() {
        assert_eq!(
            write_and_digest(b"abc", HashAlgorithm::Sha512).await,
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = digest_file(Path::new("/no/such/file.jar"), HashAlgorithm::Sha1)
            .await
            .unwrap_err();
        assert!(matches!(err, SorterError::Io { .. }));
    }

    #[test]
    fn wire_names() {
        assert_eq!(HashAlgorithm::Sha1.as_str(), "sha1");
        assert_eq!(HashAlgorithm::Sha512.as_str(), "sha512");
    }
}
