//! Proposal module - The heart of DAO governance
//!
//! Handles proposal submission, voting, finalization and execution.

mod models;
mod registry;

pub use models::*;
pub use registry::ProposalRegistry;
