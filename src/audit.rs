//! Audit Log
//!
//! Append-only, in-memory record of governance actions. Entries are written
//! by the service layer after each successful core operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Upper bound on entries returned by a single query
pub const MAX_AUDIT_PAGE: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    pub fn new(action: AuditAction, resource_type: impl Into<String>, resource_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            resource_type: resource_type.into(),
            resource_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // Proposal lifecycle
    ProposalSubmitted,
    VoteCast,
    ProposalFinalized,
    ProposalExecuted,

    // Symbolic governance
    SymbolicEvaluated,
    CommitmentVerified,
}

pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an audit entry
    pub async fn record(&self, entry: AuditEntry) {
        debug!("Audit: {:?} on {} {:?}", entry.action, entry.resource_type, entry.resource_id);
        let mut entries = self.entries.write().await;
        entries.push(entry);
    }

    /// Most recent entries first, optionally for one resource
    pub async fn entries(&self, resource_id: Option<Uuid>, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;

        entries
            .iter()
            .rev()
            .filter(|e| resource_id.map_or(true, |id| e.resource_id == Some(id)))
            .take(limit.min(MAX_AUDIT_PAGE))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_entries_most_recent_first() {
        let log = AuditLog::new();
        let id = Uuid::new_v4();
        log.record(AuditEntry::new(AuditAction::ProposalSubmitted, "proposal", Some(id))).await;
        log.record(AuditEntry::new(AuditAction::VoteCast, "proposal", Some(id))).await;

        let entries = log.entries(None, 10).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuditAction::VoteCast);
        assert_eq!(entries[1].action, AuditAction::ProposalSubmitted);
    }

    #[tokio::test]
    async fn test_filter_by_resource_and_limit() {
        let log = AuditLog::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        for _ in 0..3 {
            log.record(AuditEntry::new(AuditAction::VoteCast, "proposal", Some(a))).await;
        }
        log.record(
            AuditEntry::new(AuditAction::ProposalFinalized, "proposal", Some(b))
                .with_details(json!({ "status": "approved" })),
        )
        .await;

        assert_eq!(log.entries(Some(a), 10).await.len(), 3);
        assert_eq!(log.entries(Some(a), 2).await.len(), 2);

        let for_b = log.entries(Some(b), 10).await;
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].details, Some(json!({ "status": "approved" })));
        assert_eq!(log.len().await, 4);
    }
}
