//! Content digests for stored blobs
//!
//! Every blob is identified by a full-length Blake3 digest; the first ten
//! hex characters double as the fingerprint embedded in request paths and
//! storage keys.

use blake3::Hasher;

/// Compute the hex digest of blob content
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content);
    hex::encode(hasher.finalize().as_bytes())
}
