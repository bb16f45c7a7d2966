//! Proposal registry
//!
//! Insertion-only, in-memory registry owning every proposal and its
//! lifecycle. A single lock guards the whole map for the duration of each
//! operation; nothing in here performs I/O or awaits anything but the lock.

use crate::error::GovernanceError;
use crate::proposal::{
    ExecutionReceipt, FinalizeOutcome, Proposal, ProposalId, ProposalStatus, ProposalSummary, VoteTally,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Thread-safe proposal registry
pub struct ProposalRegistry {
    proposals: RwLock<HashMap<ProposalId, Proposal>>,
    /// Minimum total votes before a proposal can pass; fixed at construction
    quorum: u64,
}

impl ProposalRegistry {
    pub fn new(quorum: u64) -> Self {
        Self {
            proposals: RwLock::new(HashMap::new()),
            quorum,
        }
    }

    pub fn quorum(&self) -> u64 {
        self.quorum
    }

    /// Create a proposal and open it for voting
    pub async fn submit(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        proposer: impl Into<String>,
    ) -> ProposalId {
        let mut proposal = Proposal::open(title.into(), description.into(), proposer.into());

        let mut proposals = self.proposals.write().await;
        while proposals.contains_key(&proposal.id) {
            proposal.id = Uuid::new_v4();
        }

        let id = proposal.id;
        info!("Submitted proposal '{}' (id: {})", proposal.title, id);
        proposals.insert(id, proposal);
        id
    }

    /// Count one vote on an active proposal
    pub async fn vote(&self, id: ProposalId, support: bool) -> Result<VoteTally, GovernanceError> {
        let mut proposals = self.proposals.write().await;
        let proposal = proposals.get_mut(&id).ok_or(GovernanceError::NotFound(id))?;

        let tally = proposal.record_vote(support)?;
        debug!(
            "Vote {} on proposal {} (for: {}, against: {})",
            if support { "for" } else { "against" },
            id,
            tally.votes_for,
            tally.votes_against
        );
        Ok(tally)
    }

    /// Apply the quorum + majority rule to an active proposal.
    ///
    /// Also returns the proposal as it stood right after the transition.
    pub async fn finalize(&self, id: ProposalId) -> Result<(FinalizeOutcome, Proposal), GovernanceError> {
        let mut proposals = self.proposals.write().await;
        let proposal = proposals.get_mut(&id).ok_or(GovernanceError::NotFound(id))?;

        let outcome = proposal.finalize(self.quorum)?;
        info!(
            "Finalized proposal {} as {} ({:?}, {}/{} with quorum {})",
            id, outcome.status, outcome.reason, outcome.votes_for, outcome.votes_against, outcome.quorum
        );
        Ok((outcome, proposal.clone()))
    }

    /// Enact an approved proposal, returning the receipt and the executed proposal
    pub async fn execute(&self, id: ProposalId) -> Result<(ExecutionReceipt, Proposal), GovernanceError> {
        let mut proposals = self.proposals.write().await;
        let proposal = proposals.get_mut(&id).ok_or(GovernanceError::NotFound(id))?;

        let receipt = proposal.execute()?;
        info!("Executed proposal '{}' (id: {})", proposal.title, id);
        Ok((receipt, proposal.clone()))
    }

    /// Get a proposal by ID
    pub async fn get(&self, id: ProposalId) -> Result<Proposal, GovernanceError> {
        let proposals = self.proposals.read().await;
        proposals.get(&id).cloned().ok_or(GovernanceError::NotFound(id))
    }

    /// List proposals oldest first, optionally filtered by status
    pub async fn list(&self, status: Option<ProposalStatus>) -> Vec<ProposalSummary> {
        let proposals = self.proposals.read().await;
        let mut summaries: Vec<ProposalSummary> = proposals
            .values()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .map(ProposalSummary::from)
            .collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        summaries
    }

    /// Get proposal count
    pub async fn count(&self) -> usize {
        let proposals = self.proposals.read().await;
        proposals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_submit_creates_active_proposal() {
        let registry = ProposalRegistry::new(3);
        let id = registry.submit("Raise fee cap", "...", "alice").await;

        let proposal = registry.get(id).await.unwrap();
        assert_eq!(proposal.id, id);
        assert_eq!(proposal.status, ProposalStatus::Active);
        assert_eq!(proposal.proposer, "alice");
        assert_eq!(proposal.tally(), VoteTally { votes_for: 0, votes_against: 0 });
    }

    #[tokio::test]
    async fn test_submitted_ids_are_unique() {
        let registry = ProposalRegistry::new(3);
        let mut ids = HashSet::new();
        for i in 0..200 {
            let id = registry.submit(format!("p{}", i), "", "bob").await;
            assert!(ids.insert(id), "id {} reused", id);
        }
        assert_eq!(registry.count().await, 200);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let registry = ProposalRegistry::new(3);
        let missing = Uuid::new_v4();

        assert_eq!(registry.vote(missing, true).await, Err(GovernanceError::NotFound(missing)));
        assert_eq!(registry.finalize(missing).await.unwrap_err(), GovernanceError::NotFound(missing));
        assert_eq!(registry.execute(missing).await.unwrap_err(), GovernanceError::NotFound(missing));
        assert!(registry.get(missing).await.is_err());
    }

    #[tokio::test]
    async fn test_counters_monotonic_then_frozen() {
        let registry = ProposalRegistry::new(3);
        let id = registry.submit("t", "d", "carol").await;

        let mut last = VoteTally { votes_for: 0, votes_against: 0 };
        for support in [true, false, true, true, false] {
            let tally = registry.vote(id, support).await.unwrap();
            assert!(tally.votes_for >= last.votes_for);
            assert!(tally.votes_against >= last.votes_against);
            last = tally;
        }

        registry.finalize(id).await.unwrap();
        assert_err!(registry.vote(id, true).await);
        assert_eq!(registry.get(id).await.unwrap().tally(), last);
    }

    #[tokio::test]
    async fn test_finalize_examples_with_quorum_three() {
        let registry = ProposalRegistry::new(3);
        let cases = [
            (2, 0, ProposalStatus::Rejected),
            (2, 1, ProposalStatus::Approved),
            (1, 1, ProposalStatus::Rejected),
        ];

        for (votes_for, votes_against, expected) in cases {
            let id = registry.submit("t", "d", "dave").await;
            for _ in 0..votes_for {
                registry.vote(id, true).await.unwrap();
            }
            for _ in 0..votes_against {
                registry.vote(id, false).await.unwrap();
            }
            let (outcome, _) = registry.finalize(id).await.unwrap();
            assert_eq!(outcome.status, expected, "{}/{}", votes_for, votes_against);
            assert_eq!(registry.get(id).await.unwrap().status, expected);
        }
    }

    #[tokio::test]
    async fn test_fee_cap_scenario() {
        let registry = ProposalRegistry::new(3);
        let id = registry.submit("Raise fee cap", "...", "alice").await;

        assert_ok!(registry.vote(id, true).await);
        assert_ok!(registry.vote(id, true).await);
        assert_ok!(registry.vote(id, false).await);

        let (outcome, _) = registry.finalize(id).await.unwrap();
        assert_eq!(outcome.status, ProposalStatus::Approved);

        let (receipt, _) = registry.execute(id).await.unwrap();
        assert_eq!(receipt.proposal_id, id);
        assert!(receipt.executed);

        let err = registry.execute(id).await.unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::InvalidState { status: ProposalStatus::Executed, .. }
        ));
    }

    #[tokio::test]
    async fn test_transitions_return_post_transition_snapshot() {
        let registry = ProposalRegistry::new(3);
        let id = registry.submit("Raise fee cap", "...", "alice").await;
        for support in [true, true, false] {
            registry.vote(id, support).await.unwrap();
        }

        let (outcome, finalized) = registry.finalize(id).await.unwrap();
        assert_eq!(finalized.id, id);
        assert_eq!(finalized.status, outcome.status);
        assert_eq!(finalized.tally(), VoteTally { votes_for: 2, votes_against: 1 });
        assert!(finalized.finalized_at.is_some());
        assert!(finalized.executed_at.is_none());

        let (_, executed) = registry.execute(id).await.unwrap();
        assert_eq!(executed.status, ProposalStatus::Executed);
        assert!(executed.executed_at.is_some());

        // The finalize snapshot is a copy and is not touched by later transitions
        assert_eq!(finalized.status, ProposalStatus::Approved);
    }

    #[tokio::test]
    async fn test_execute_rejected_or_active_fails() {
        let registry = ProposalRegistry::new(1);
        let active = registry.submit("a", "", "x").await;
        assert_err!(registry.execute(active).await);

        let rejected = registry.submit("r", "", "x").await;
        registry.vote(rejected, false).await.unwrap();
        registry.finalize(rejected).await.unwrap();
        assert_err!(registry.execute(rejected).await);
        assert_eq!(registry.get(rejected).await.unwrap().status, ProposalStatus::Rejected);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let registry = ProposalRegistry::new(1);
        let first = registry.submit("first", "", "x").await;
        let second = registry.submit("second", "", "x").await;
        registry.vote(second, true).await.unwrap();
        registry.finalize(second).await.unwrap();

        let all = registry.list(None).await;
        assert_eq!(all.len(), 2);

        let active = registry.list(Some(ProposalStatus::Active)).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, first);

        let approved = registry.list(Some(ProposalStatus::Approved)).await;
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, second);
    }

    #[tokio::test]
    async fn test_concurrent_votes_are_all_counted() {
        let registry = Arc::new(ProposalRegistry::new(3));
        let id = registry.submit("t", "d", "eve").await;

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.vote(id, i % 2 == 0).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let proposal = registry.get(id).await.unwrap();
        assert_eq!(proposal.tally(), VoteTally { votes_for: 25, votes_against: 25 });
    }
}
