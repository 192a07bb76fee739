//! Diploma file hashing.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Lowercase hex SHA-256 of `bytes`.
pub fn file_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Read a file and hash its contents.
pub async fn file_hash_path(path: impl AsRef<Path>) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(file_hash(&bytes))
}
