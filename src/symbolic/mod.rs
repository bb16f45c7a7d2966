//! Symbolic governance module
//!
//! Deterministic rule evaluation over a proposal's risk/impact tags. Runs
//! independently of the proposal registry and never touches its state.

pub mod evaluator;
pub mod models;

pub use evaluator::{SymbolicEvaluation, SymbolicEvaluator};
pub use models::{Decision, Impact, Risk};
