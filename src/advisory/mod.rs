//! Advisory collaborators
//!
//! External, non-authoritative inputs (policy analysis text, scenario
//! vectors). Reports are attached to responses and audit entries only; the
//! proposal lifecycle never branches on them. Callers must invoke an advisor
//! after releasing any registry lock.

mod oracle;
mod simulator;

pub use oracle::{DisabledOracle, PolicyOracle, StaticOracle};
pub use simulator::{HadamardSimulator, ScenarioSimulator};

use crate::proposal::Proposal;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Opaque advisory output for one proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    pub scenario: Vec<f64>,
    pub assessed_at: DateTime<Utc>,
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn assess(&self, proposal: &Proposal) -> AdvisoryReport;
}

/// Combines one policy oracle with one scenario simulator.
///
/// Oracle failures are logged and leave `analysis` empty. They are never
/// retried and never reach the caller as errors.
pub struct AdvisoryPanel {
    oracle: Arc<dyn PolicyOracle>,
    simulator: Arc<dyn ScenarioSimulator>,
}

impl AdvisoryPanel {
    pub fn new(oracle: Arc<dyn PolicyOracle>, simulator: Arc<dyn ScenarioSimulator>) -> Self {
        Self { oracle, simulator }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledOracle), Arc::new(HadamardSimulator))
    }
}

#[async_trait]
impl Advisor for AdvisoryPanel {
    async fn assess(&self, proposal: &Proposal) -> AdvisoryReport {
        let analysis = match self.oracle.analyze(&proposal.title, &proposal.description).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Advisory analysis for proposal {} failed: {}", proposal.id, e);
                None
            }
        };

        AdvisoryReport {
            analysis,
            scenario: self.simulator.sample(),
            assessed_at: Utc::now(),
        }
    }
}
