//! Commitment hashing
//!
//! The digest is pinned to SHA3-512. Commitments must stay reproducible, so
//! changing the algorithm or the pre-image layout means bumping
//! [`COMMITMENT_FORMAT_VERSION`].

use sha3::{Digest, Sha3_512};

/// Version of the commitment pre-image and digest layout
pub const COMMITMENT_FORMAT_VERSION: u32 = 1;

/// Length of a hex-encoded SHA3-512 digest
pub const DIGEST_HEX_LEN: usize = 128;

/// SHA3-512 over the UTF-8 bytes of `data`, lowercase hex
pub fn qs_hash(data: &str) -> String {
    let mut hasher = Sha3_512::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two hex digests ignoring case, without exiting early on a mismatch
pub fn digests_match(expected: &str, candidate: &str) -> bool {
    if expected.len() != candidate.len() {
        return false;
    }
    expected
        .bytes()
        .zip(candidate.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a.to_ascii_lowercase() ^ b.to_ascii_lowercase()))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector_empty_string() {
        assert_eq!(
            qs_hash(""),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );
    }

    #[test]
    fn test_output_is_lowercase_hex_of_fixed_length() {
        let digest = qs_hash("LOW ∧ POSITIVEAPPROVE");
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(qs_hash("alice"), qs_hash("alice"));
        assert_ne!(qs_hash("alice"), qs_hash("bob"));
    }

    #[test]
    fn test_digests_match_ignores_case() {
        let digest = qs_hash("x");
        assert!(digests_match(&digest, &digest.to_uppercase()));
        assert!(!digests_match(&digest, &qs_hash("y")));
        assert!(!digests_match(&digest, &digest[..64]));
    }
}
