//! # Content Digest
//!
//! SHA-256 digests over [`CanonicalBytes`]. A document digest is a stable
//! fingerprint of its semantic content, suitable for a back-matter `hash`
//! entry (`algorithm: "SHA-256"`) or for detecting that a revision changed
//! nothing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// The hash algorithm used to produce a content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the short algorithm identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Returns the name OSCAL `hash.algorithm` uses for this algorithm.
    pub fn oscal_name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a new content digest from raw bytes and algorithm.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Returns true if a back-matter `hash` entry records this digest.
    /// The algorithm name and hex value are compared case-insensitively.
    pub fn matches_oscal_hash(&self, algorithm: &str, value: &str) -> bool {
        algorithm.eq_ignore_ascii_case(self.algorithm.oscal_name())
            && value.trim().eq_ignore_ascii_case(&self.to_hex())
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, so no code path can digest a
/// key-order-dependent serialization.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_digest_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(sha256_digest(&cb), sha256_digest(&cb));
    }

    #[test]
    fn test_content_digest_display() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let s = sha256_digest(&cb).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn test_known_sha256_vector() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_matches_oscal_hash_entry() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        let digest = sha256_digest(&cb);
        let upper = digest.to_hex().to_ascii_uppercase();
        assert!(digest.matches_oscal_hash("SHA-256", &upper));
        assert!(!digest.matches_oscal_hash("SHA-512", &upper));
        assert!(!digest.matches_oscal_hash("SHA-256", "00"));
    }

    #[test]
    fn test_oscal_algorithm_name() {
        assert_eq!(DigestAlgorithm::Sha256.oscal_name(), "SHA-256");
    }
}
