//! Remote statement retrieval.
//!
//! [`StatementFetcher`] is the seam between the view layer and the backend:
//! one call retrieves one page. Implementations are stateless
//! request/response mappings; retrying is a caller-level decision.

mod error;
mod http;

pub use error::FetchError;
pub use http::HttpStatementFetcher;

use async_trait::async_trait;

use crate::domain::{AccountStatement, StatementFilter};

/// Parameters for one statement page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub tenant_id: String,
    pub account_id: String,
    pub page: u32,
    pub page_size: u32,
    pub filter: StatementFilter,
}

impl StatementRequest {
    /// Check the preconditions every fetcher relies on. Violations are caller
    /// bugs, reported before any network traffic.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.tenant_id.is_empty() {
            return Err(FetchError::InvalidRequest("tenant id is empty".into()));
        }
        if self.account_id.is_empty() {
            return Err(FetchError::InvalidRequest("account id is empty".into()));
        }
        if self.page < 1 {
            return Err(FetchError::InvalidRequest("page must be at least 1".into()));
        }
        if self.page_size < 1 {
            return Err(FetchError::InvalidRequest(
                "page size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
pub trait StatementFetcher: Send + Sync {
    /// Retrieve one page of an account statement. The returned entries
    /// reflect exactly the requested filters and page window. Implementations
    /// must not retry internally and must not return partial data on failure.
    async fn fetch_statement(
        &self,
        request: &StatementRequest,
    ) -> Result<AccountStatement, FetchError>;
}
