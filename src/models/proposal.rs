//! Proposal-related request DTOs

use serde::Deserialize;
use validator::Validate;

/// Request to submit a new proposal
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProposalRequest {
    #[validate(length(min = 1, max = 256, message = "Title must be between 1 and 256 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,
    #[validate(length(min = 1, max = 256, message = "Proposer must be between 1 and 256 characters"))]
    pub proposer: String,
}

/// Request to cast a vote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub support: bool,
}
