//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::advisory::{Advisor, AdvisoryPanel, HadamardSimulator, StaticOracle};
use crate::audit::AuditLog;
use crate::config::{AdvisoryMode, Settings};
use crate::proposal::ProposalRegistry;
use crate::symbolic::SymbolicEvaluator;
use std::sync::Arc;
use tracing::info;

/// Text served by the static oracle when none is configured
const DEFAULT_STATIC_ANALYSIS: &str = "No advisory concerns recorded";

/// Application state shared across all handlers
pub struct AppState {
    /// Proposal lifecycle registry (has internal locking)
    pub registry: ProposalRegistry,

    /// Stateless symbolic rule evaluator
    pub evaluator: SymbolicEvaluator,

    /// Advisory collaborators, consulted only after registry operations return
    pub advisor: Arc<dyn Advisor>,

    /// Governance audit trail
    pub audit: AuditLog,
}

impl AppState {
    pub fn new(quorum: u64, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            registry: ProposalRegistry::new(quorum),
            evaluator: SymbolicEvaluator::new(),
            advisor,
            audit: AuditLog::new(),
        }
    }

    /// Build state from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        let advisor: Arc<dyn Advisor> = match settings.advisory.mode {
            AdvisoryMode::Disabled => Arc::new(AdvisoryPanel::disabled()),
            AdvisoryMode::Static => {
                let text = settings
                    .advisory
                    .static_text
                    .clone()
                    .unwrap_or_else(|| DEFAULT_STATIC_ANALYSIS.to_string());
                Arc::new(AdvisoryPanel::new(
                    Arc::new(StaticOracle::new(text)),
                    Arc::new(HadamardSimulator),
                ))
            }
        };

        info!(
            "Governance state ready (quorum: {}, advisory: {:?})",
            settings.governance.quorum, settings.advisory.mode
        );
        Self::new(settings.governance.quorum, advisor)
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
