//! Symbolic Evaluator
//!
//! Fixed decision table over risk/impact tags, plus a SHA3-512 commitment
//! binding the symbolic state to the decision. Stateless and total: every
//! risk × impact pair has exactly one decision.

use crate::hashing::{digests_match, qs_hash, COMMITMENT_FORMAT_VERSION};
use crate::symbolic::models::{Decision, Impact, Risk, SymbolicProposal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of evaluating a symbolic proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolicEvaluation {
    pub symbolic_state: String,
    pub decision: Decision,
    pub commitment_hash: String,
    pub format_version: u32,
}

/// The symbolic governance rule evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicEvaluator;

impl SymbolicEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Decision table, first match wins
    pub fn decide(risk: Risk, impact: Impact) -> Decision {
        match (risk, impact) {
            (Risk::High, Impact::Negative) => Decision::Reject,
            (Risk::High, Impact::Positive) => Decision::RequireDelay,
            (Risk::High, Impact::Neutral) | (Risk::Medium | Risk::Low, _) => Decision::Approve,
        }
    }

    /// `SHA3-512(symbolic_state ++ decision_label)`, no separator
    pub fn commitment(symbolic_state: &str, decision: Decision) -> String {
        let mut preimage = String::with_capacity(symbolic_state.len() + decision.label().len());
        preimage.push_str(symbolic_state);
        preimage.push_str(decision.label());
        qs_hash(&preimage)
    }

    /// Evaluate a proposal's tags into a decision and commitment
    pub fn evaluate(&self, proposal: &SymbolicProposal) -> SymbolicEvaluation {
        let symbolic_state = proposal.symbolic_state();
        let decision = Self::decide(proposal.risk, proposal.impact);
        let commitment_hash = Self::commitment(&symbolic_state, decision);

        debug!("Symbolic evaluation '{}' -> {}", symbolic_state, decision);

        SymbolicEvaluation {
            symbolic_state,
            decision,
            commitment_hash,
            format_version: COMMITMENT_FORMAT_VERSION,
        }
    }

    /// Build a symbolic proposal from raw inputs and evaluate it
    pub fn evaluate_symbolic(
        &self,
        title: &str,
        description: &str,
        proposer_id: &str,
        risk: Risk,
        impact: Impact,
    ) -> (SymbolicProposal, SymbolicEvaluation) {
        let proposal = SymbolicProposal::new(title, description, proposer_id).with_tags(risk, impact);
        let evaluation = self.evaluate(&proposal);
        (proposal, evaluation)
    }

    /// Check a previously published commitment against its claimed inputs
    pub fn verify_commitment(&self, symbolic_state: &str, decision: Decision, commitment_hash: &str) -> bool {
        digests_match(&Self::commitment(symbolic_state, decision), commitment_hash)
    }
}
