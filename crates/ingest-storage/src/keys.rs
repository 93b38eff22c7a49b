//! Shared key generation for storage backends.
//!
//! Key format: `files/{uuid}`. Addresses end with the key, so the uuid is
//! always the last path segment.

use crate::traits::{StorageError, StorageResult};
use ingest_core::constants::BLOB_KEY_PREFIX;
use uuid::Uuid;

/// Generate a fresh storage key.
pub fn generate_storage_key() -> String {
    format!("{}/{}", BLOB_KEY_PREFIX, Uuid::new_v4())
}

/// Derive the storage key from an address (full URL or bare key).
///
/// Only the last path segment is considered, and it must be a UUID. This
/// keeps arbitrary client-influenced strings from reaching the backend.
pub fn key_from_address(address: &str) -> StorageResult<String> {
    let without_query = address
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let name = without_query.rsplit('/').next().unwrap_or_default();

    let id = Uuid::parse_str(name).map_err(|_| {
        StorageError::InvalidKey(format!("address does not reference a blob: {}", address))
    })?;

    Ok(format!("{}/{}", BLOB_KEY_PREFIX, id))
}

/// Join a base URL and a key.
pub fn join_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_url() {
        let key = generate_storage_key();
        let url = join_url("http://localhost:8080/blobs/", &key);
        assert_eq!(key_from_address(&url).unwrap(), key);
        assert_eq!(key_from_address(&key).unwrap(), key);
    }

    #[test]
    fn test_query_and_trailing_slash_ignored() {
        let id = Uuid::new_v4();
        let url = format!("https://bucket.s3.eu-west-1.amazonaws.com/files/{}/?sig=1", id);
        assert_eq!(key_from_address(&url).unwrap(), format!("files/{}", id));
    }

    #[test]
    fn test_non_uuid_rejected() {
        assert!(matches!(
            key_from_address("http://localhost/files/../../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(key_from_address("").is_err());
    }
}
