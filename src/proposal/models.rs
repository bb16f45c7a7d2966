//! Proposal data models
//!
//! Defines governance proposals, their lifecycle status and the results of
//! the finalize/execute transitions.

use crate::error::GovernanceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque proposal identifier, rendered in hyphenated UUID form.
pub type ProposalId = Uuid;

/// Message returned by a successful execution.
pub const EXECUTION_MESSAGE: &str = "Policy enacted via DAO governance";

/// Proposal status in the governance lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Constructed but not yet inserted into a registry
    #[default]
    Pending,
    /// Open for votes
    Active,
    /// Passed quorum and majority, awaiting execution
    Approved,
    /// Failed quorum or majority
    Rejected,
    /// Enacted
    Executed,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Active => "active",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Executed => "executed",
        }
    }

    /// Whether `next` is a legal forward step from this status.
    pub fn can_transition_to(self, next: ProposalStatus) -> bool {
        use ProposalStatus::*;

        match self {
            Pending => next == Active,
            Active => matches!(next, Approved | Rejected),
            Approved => next == Executed,
            Rejected | Executed => false,
        }
    }

    pub fn accepts_votes(self) -> bool {
        self == ProposalStatus::Active
    }

}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ProposalStatus::Pending),
            "active" => Ok(ProposalStatus::Active),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            "executed" => Ok(ProposalStatus::Executed),
            other => Err(format!("Unknown proposal status '{}'", other)),
        }
    }
}

/// A governance proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    /// Opaque identifier of the submitter
    pub proposer: String,
    pub votes_for: u64,
    pub votes_against: u64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
}

impl Proposal {
    /// Create a new pending proposal with zero tallies
    pub fn new(title: String, description: String, proposer: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            proposer,
            votes_for: 0,
            votes_against: 0,
            status: ProposalStatus::Pending,
            created_at: now,
            updated_at: now,
            finalized_at: None,
            executed_at: None,
        }
    }

    pub fn tally(&self) -> VoteTally {
        VoteTally {
            votes_for: self.votes_for,
            votes_against: self.votes_against,
        }
    }

    /// Create a proposal already open for voting.
    ///
    /// PENDING -> ACTIVE is the only step out of PENDING and a fresh proposal
    /// is always PENDING, so opening cannot fail.
    pub fn open(title: String, description: String, proposer: String) -> Self {
        let mut proposal = Self::new(title, description, proposer);
        debug_assert!(proposal.status.can_transition_to(ProposalStatus::Active));
        proposal.status = ProposalStatus::Active;
        proposal
    }

    /// Count one vote. Callers own one-vote-per-principal enforcement.
    pub fn record_vote(&mut self, support: bool) -> Result<VoteTally, GovernanceError> {
        if !self.status.accepts_votes() {
            return Err(self.invalid_state("vote on"));
        }

        if support {
            self.votes_for = self.votes_for.saturating_add(1);
        } else {
            self.votes_against = self.votes_against.saturating_add(1);
        }
        self.updated_at = Utc::now();
        Ok(self.tally())
    }

    /// Close voting and apply the quorum + majority rule
    pub fn finalize(&mut self, quorum: u64) -> Result<FinalizeOutcome, GovernanceError> {
        if self.status != ProposalStatus::Active {
            return Err(self.invalid_state("finalize"));
        }

        let reason = FinalizeReason::decide(self.votes_for, self.votes_against, quorum);
        self.transition(reason.status(), "finalize")?;
        self.finalized_at = Some(self.updated_at);

        Ok(FinalizeOutcome {
            proposal_id: self.id,
            status: self.status,
            votes_for: self.votes_for,
            votes_against: self.votes_against,
            quorum,
            reason,
        })
    }

    /// Enact an approved proposal
    pub fn execute(&mut self) -> Result<ExecutionReceipt, GovernanceError> {
        self.transition(ProposalStatus::Executed, "execute")?;
        self.executed_at = Some(self.updated_at);

        Ok(ExecutionReceipt {
            proposal_id: self.id,
            executed: true,
            message: EXECUTION_MESSAGE.to_string(),
        })
    }

    fn transition(&mut self, next: ProposalStatus, operation: &'static str) -> Result<(), GovernanceError> {
        if !self.status.can_transition_to(next) {
            return Err(self.invalid_state(operation));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn invalid_state(&self, operation: &'static str) -> GovernanceError {
        GovernanceError::InvalidState {
            id: self.id,
            status: self.status,
            operation,
        }
    }
}

/// Snapshot of a proposal's vote counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub votes_for: u64,
    pub votes_against: u64,
}

/// Why finalize settled on its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeReason {
    /// Fewer total votes than the quorum
    QuorumNotMet,
    /// Quorum met and strictly more votes for than against
    MajorityFor,
    /// Quorum met but votes for did not exceed votes against
    MajorityAgainstOrTie,
}

impl FinalizeReason {
    /// Quorum is checked first, then strict majority. Ties reject.
    pub fn decide(votes_for: u64, votes_against: u64, quorum: u64) -> Self {
        let total = votes_for.saturating_add(votes_against);
        if total < quorum {
            FinalizeReason::QuorumNotMet
        } else if votes_for > votes_against {
            FinalizeReason::MajorityFor
        } else {
            FinalizeReason::MajorityAgainstOrTie
        }
    }

    pub fn status(self) -> ProposalStatus {
        match self {
            FinalizeReason::MajorityFor => ProposalStatus::Approved,
            FinalizeReason::QuorumNotMet | FinalizeReason::MajorityAgainstOrTie => ProposalStatus::Rejected,
        }
    }
}

/// Result of finalizing a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeOutcome {
    pub proposal_id: ProposalId,
    pub status: ProposalStatus,
    pub votes_for: u64,
    pub votes_against: u64,
    pub quorum: u64,
    pub reason: FinalizeReason,
}

/// Result of executing an approved proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReceipt {
    pub proposal_id: ProposalId,
    pub executed: bool,
    pub message: String,
}

/// Lightweight listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub id: ProposalId,
    pub title: String,
    pub proposer: String,
    pub status: ProposalStatus,
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Proposal> for ProposalSummary {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            proposer: p.proposer.clone(),
            status: p.status,
            votes_for: p.votes_for,
            votes_against: p.votes_against,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
