//! Symbolic evaluation request DTOs

use crate::hashing::DIGEST_HEX_LEN;
use crate::symbolic::{Decision, Impact, Risk};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

static HEX_DIGEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[0-9a-fA-F]{{{}}}$", DIGEST_HEX_LEN)).expect("hex digest pattern is valid")
});

/// Request to evaluate a proposal's symbolic tags
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateSymbolicRequest {
    #[validate(length(max = 256, message = "Title must be at most 256 characters"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,
    #[validate(length(min = 1, max = 256, message = "Proposer id must be between 1 and 256 characters"))]
    pub proposer_id: String,
    /// Defaults to MEDIUM
    #[serde(default)]
    pub risk: Risk,
    /// Defaults to NEUTRAL
    #[serde(default)]
    pub impact: Impact,
}

/// Request to check a published commitment
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCommitmentRequest {
    #[validate(length(min = 1, message = "Symbolic state is required"))]
    pub symbolic_state: String,
    pub decision: Decision,
    #[validate(custom(function = "validate_hex_digest"))]
    pub commitment_hash: String,
}

/// Commitment hashes are SHA3-512 rendered as hex
fn validate_hex_digest(value: &str) -> Result<(), validator::ValidationError> {
    if !HEX_DIGEST.is_match(value) {
        let mut err = validator::ValidationError::new("invalid_commitment_hash");
        err.message = Some(format!("Commitment hash must be {} hex characters", DIGEST_HEX_LEN).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::qs_hash;

    #[test]
    fn test_evaluate_request_defaults_tags() {
        let req: EvaluateSymbolicRequest = serde_json::from_str(r#"{"proposerId":"alice"}"#).unwrap();
        assert_eq!(req.risk, Risk::Medium);
        assert_eq!(req.impact, Impact::Neutral);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_evaluate_request_requires_proposer() {
        let req: EvaluateSymbolicRequest =
            serde_json::from_str(r#"{"proposerId":"","risk":"HIGH","impact":"NEGATIVE"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_verify_request_checks_hash_shape() {
        let good = VerifyCommitmentRequest {
            symbolic_state: "LOW ∧ NEUTRAL".into(),
            decision: Decision::Approve,
            commitment_hash: qs_hash("anything"),
        };
        assert!(good.validate().is_ok());

        let bad = VerifyCommitmentRequest {
            commitment_hash: "not-a-digest".into(),
            ..good
        };
        assert!(bad.validate().is_err());
    }
}
