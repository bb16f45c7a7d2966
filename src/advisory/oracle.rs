//! Policy oracle
//!
//! Opaque, non-authoritative text analysis of a proposal. Providers (LLM
//! endpoints and the like) plug in behind [`PolicyOracle`]; the governance
//! core never parses the text it returns.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
}

pub type OracleResult<T> = Result<T, OracleError>;

#[async_trait]
pub trait PolicyOracle: Send + Sync {
    /// Free-form analysis of a proposal. `Ok(None)` means no analysis is offered.
    async fn analyze(&self, title: &str, description: &str) -> OracleResult<Option<String>>;
}

/// Oracle used when no provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOracle;

#[async_trait]
impl PolicyOracle for DisabledOracle {
    async fn analyze(&self, _title: &str, _description: &str) -> OracleResult<Option<String>> {
        Ok(None)
    }
}

/// Oracle that answers every request with the same text.
///
/// Blank text counts as a misconfigured provider and is reported as
/// [`OracleError::Unavailable`].
#[derive(Debug, Clone)]
pub struct StaticOracle {
    text: String,
}

impl StaticOracle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl PolicyOracle for StaticOracle {
    async fn analyze(&self, _title: &str, _description: &str) -> OracleResult<Option<String>> {
        if self.text.trim().is_empty() {
            return Err(OracleError::Unavailable("no static analysis text configured".to_string()));
        }
        Ok(Some(self.text.clone()))
    }
}
