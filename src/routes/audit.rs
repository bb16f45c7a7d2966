//! Audit Routes

use crate::audit::AuditEntry;
use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::models::SuccessResponse;
use crate::state::SharedState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub resource_id: Option<Uuid>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub entries: Vec<AuditEntry>,
}

/// Get audit log entries, most recent first
pub async fn get_audit_log(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<AuditQuery>,
) -> ApiResult<Json<SuccessResponse<AuditResponse>>> {
    let entries = state
        .audit
        .entries(query.resource_id, query.limit.unwrap_or(DEFAULT_LIMIT))
        .await;

    Ok(Json(SuccessResponse::with_data(
        format!("Found {} audit entries", entries.len()),
        AuditResponse { entries },
    )))
}
