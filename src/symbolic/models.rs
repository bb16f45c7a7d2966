//! Symbolic proposal models
//!
//! Risk/impact tags, the decisions they map to, and the privacy-preserving
//! proposal record the evaluator works on.

use crate::hashing::qs_hash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the risk and impact labels in a symbolic state.
///
/// Part of the commitment pre-image; see `hashing::COMMITMENT_FORMAT_VERSION`.
pub const STATE_SEPARATOR: &str = " ∧ ";

/// Declared risk of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Risk {
    Low,
    #[default]
    Medium,
    High,
}

impl Risk {
    #[cfg(test)]
    pub const ALL: [Risk; 3] = [Risk::Low, Risk::Medium, Risk::High];

    pub fn label(self) -> &'static str {
        match self {
            Risk::Low => "LOW",
            Risk::Medium => "MEDIUM",
            Risk::High => "HIGH",
        }
    }
}

/// Declared impact of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Impact {
    #[cfg(test)]
    pub const ALL: [Impact; 3] = [Impact::Positive, Impact::Neutral, Impact::Negative];

    pub fn label(self) -> &'static str {
        match self {
            Impact::Positive => "POSITIVE",
            Impact::Neutral => "NEUTRAL",
            Impact::Negative => "NEGATIVE",
        }
    }
}

/// Outcome of the symbolic decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Reject,
    RequireDelay,
}

impl Decision {
    /// Canonical label, hashed into the commitment
    pub fn label(self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Reject => "REJECT",
            Decision::RequireDelay => "REQUIRE_DELAY",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A proposal as seen by the symbolic evaluator.
///
/// Only a SHA3-512 digest of the proposer id is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolicProposal {
    pub title: String,
    pub description: String,
    proposer_hash: String,
    pub risk: Risk,
    pub impact: Impact,
}

impl SymbolicProposal {
    /// New proposal tagged MEDIUM risk, NEUTRAL impact
    pub fn new(title: impl Into<String>, description: impl Into<String>, proposer_id: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            proposer_hash: qs_hash(proposer_id),
            risk: Risk::default(),
            impact: Impact::default(),
        }
    }

    pub fn with_tags(mut self, risk: Risk, impact: Impact) -> Self {
        self.risk = risk;
        self.impact = impact;
        self
    }

    pub fn proposer_hash(&self) -> &str {
        &self.proposer_hash
    }

    /// `"<RISK> ∧ <IMPACT>"`
    pub fn symbolic_state(&self) -> String {
        symbolic_state(self.risk, self.impact)
    }
}

pub fn symbolic_state(risk: Risk, impact: Impact) -> String {
    format!("{}{}{}", risk.label(), STATE_SEPARATOR, impact.label())
}
