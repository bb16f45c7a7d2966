//! Proposal Routes
//!
//! API endpoints for the proposal lifecycle: submit, vote, finalize, execute.

use crate::advisory::AdvisoryReport;
use crate::audit::{AuditAction, AuditEntry};
use crate::error::{validation_error, ApiResult, AppError};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{SubmitProposalRequest, SuccessResponse, VoteRequest};
use crate::proposal::{ExecutionReceipt, FinalizeOutcome, Proposal, ProposalStatus, ProposalSummary, VoteTally};
use crate::state::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProposalListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub proposal: Proposal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalListResponse {
    pub quorum: u64,
    pub proposals: Vec<ProposalSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub proposal_id: Uuid,
    #[serde(flatten)]
    pub tally: VoteTally,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub outcome: FinalizeOutcome,
    pub advisory: AdvisoryReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub receipt: ExecutionReceipt,
    pub advisory: AdvisoryReport,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Submit a new proposal
pub async fn submit_proposal(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<SubmitProposalRequest>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<ProposalResponse>>)> {
    req.validate().map_err(|e| validation_error(e.to_string()))?;

    let id = state.registry.submit(req.title, req.description, req.proposer).await;
    let proposal = state.registry.get(id).await?;

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::ProposalSubmitted, "proposal", Some(id)).with_details(json!({
                "title": proposal.title,
                "proposer": proposal.proposer,
            })),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data("Proposal submitted", ProposalResponse { proposal })),
    ))
}

/// Get a proposal by ID
pub async fn get_proposal(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse<ProposalResponse>>> {
    let proposal = state.registry.get(id).await?;
    Ok(Json(SuccessResponse::with_data("Proposal retrieved", ProposalResponse { proposal })))
}

/// List proposals
pub async fn list_proposals(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<ProposalListQuery>,
) -> ApiResult<Json<SuccessResponse<ProposalListResponse>>> {
    let status_filter = query
        .status
        .as_deref()
        .map(str::parse::<ProposalStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let proposals = state.registry.list(status_filter).await;

    Ok(Json(SuccessResponse::with_data(
        format!("Found {} proposals", proposals.len()),
        ProposalListResponse {
            quorum: state.registry.quorum(),
            proposals,
        },
    )))
}

/// Cast a vote on an active proposal
pub async fn cast_vote(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> ApiResult<Json<SuccessResponse<VoteResponse>>> {
    let tally = state.registry.vote(id, req.support).await?;

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::VoteCast, "proposal", Some(id))
                .with_details(json!({ "support": req.support })),
        )
        .await;

    Ok(Json(SuccessResponse::with_data(
        "Vote recorded",
        VoteResponse { proposal_id: id, tally },
    )))
}

/// Close voting and apply the quorum rule
pub async fn finalize_proposal(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse<FinalizeResponse>>> {
    let (outcome, proposal) = state.registry.finalize(id).await?;

    // Registry lock is released; advisory output is attached, never consulted.
    let advisory = state.advisor.assess(&proposal).await;

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::ProposalFinalized, "proposal", Some(id)).with_details(json!({
                "status": outcome.status,
                "reason": outcome.reason,
                "votesFor": outcome.votes_for,
                "votesAgainst": outcome.votes_against,
                "quorum": outcome.quorum,
                "advisory": advisory,
            })),
        )
        .await;

    Ok(Json(SuccessResponse::with_data(
        format!("Proposal {}", outcome.status),
        FinalizeResponse { outcome, advisory },
    )))
}

/// Execute an approved proposal
pub async fn execute_proposal(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse<ExecuteResponse>>> {
    let (receipt, proposal) = state.registry.execute(id).await?;

    let advisory = state.advisor.assess(&proposal).await;

    state
        .audit
        .record(
            AuditEntry::new(AuditAction::ProposalExecuted, "proposal", Some(id)).with_details(json!({
                "message": receipt.message,
                "advisory": advisory,
            })),
        )
        .await;

    Ok(Json(SuccessResponse::with_data(
        "Proposal executed",
        ExecuteResponse { receipt, advisory },
    )))
}
