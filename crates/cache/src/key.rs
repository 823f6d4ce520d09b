use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Build a cache id `"<prefix>:<hash>"` from any serializable key material.
///
/// The hash is a URL-safe base64 SHA-256 of the JSON encoding, so equal key
/// material always yields the same id.
pub fn cache_id<T: Serialize>(prefix: &str, key: &T) -> serde_json::Result<String> {
    let encoded = serde_json::to_vec(key)?;
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    let digest = hasher.finalize();
    Ok(format!("{prefix}:{}", URL_SAFE_NO_PAD.encode(digest)))
}

/// Hex SHA-256 of a text, used to fold long query strings into cache keys.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
