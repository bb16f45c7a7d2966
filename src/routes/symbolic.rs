//! Symbolic Governance Routes
//!
//! Stateless evaluation and commitment verification. Nothing here reads or
//! writes the proposal registry.

use crate::audit::{AuditAction, AuditEntry};
use crate::error::{validation_error, ApiResult};
use crate::extract::ApiJson;
use crate::models::{EvaluateSymbolicRequest, SuccessResponse, VerifyCommitmentRequest};
use crate::state::SharedState;
use crate::symbolic::SymbolicEvaluation;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateSymbolicResponse {
    pub evaluation: SymbolicEvaluation,
    pub proposer_hash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCommitmentResponse {
    pub valid: bool,
}

/// Evaluate risk/impact tags into a decision and commitment
pub async fn evaluate_symbolic(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<EvaluateSymbolicRequest>,
) -> ApiResult<Json<SuccessResponse<EvaluateSymbolicResponse>>> {
    req.validate().map_err(|e| validation_error(e.to_string()))?;

    let (proposal, evaluation) =
        state
            .evaluator
            .evaluate_symbolic(&req.title, &req.description, &req.proposer_id, req.risk, req.impact);

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::SymbolicEvaluated, "symbolic_proposal", None).with_details(json!({
                "symbolicState": evaluation.symbolic_state,
                "decision": evaluation.decision,
                "commitmentHash": evaluation.commitment_hash,
                "proposerHash": proposal.proposer_hash(),
            })),
        )
        .await;

    Ok(Json(SuccessResponse::with_data(
        format!("Decision: {}", evaluation.decision),
        EvaluateSymbolicResponse {
            proposer_hash: proposal.proposer_hash().to_string(),
            evaluation,
        },
    )))
}

/// Recompute a commitment and compare it to the supplied hash
pub async fn verify_commitment(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<VerifyCommitmentRequest>,
) -> ApiResult<Json<SuccessResponse<VerifyCommitmentResponse>>> {
    req.validate().map_err(|e| validation_error(e.to_string()))?;

    let valid = state
        .evaluator
        .verify_commitment(&req.symbolic_state, req.decision, &req.commitment_hash);

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::CommitmentVerified, "symbolic_proposal", None).with_details(json!({
                "symbolicState": req.symbolic_state,
                "decision": req.decision,
                "valid": valid,
            })),
        )
        .await;

    Ok(Json(SuccessResponse::with_data(
        if valid { "Commitment matches" } else { "Commitment does not match" },
        VerifyCommitmentResponse { valid },
    )))
}
