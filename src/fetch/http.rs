use async_trait::async_trait;

use crate::domain::AccountStatement;

use super::{FetchError, StatementFetcher, StatementRequest};

/// Statement fetcher backed by the billing HTTP API.
///
/// Issues `GET {base}/tenants/{tenant}/accounts/{account}/statement` with
/// `page`/`pageSize` plus one query parameter per active filter. Timeouts,
/// proxies and connection pooling stay under the caller's control via
/// [`HttpStatementFetcher::with_client`].
pub struct HttpStatementFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatementFetcher {
    /// Create a fetcher for the API at `base_url` (trailing slashes are fine).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a fetcher reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn statement_url(&self, request: &StatementRequest) -> String {
        format!(
            "{}/tenants/{}/accounts/{}/statement",
            self.base_url, request.tenant_id, request.account_id
        )
    }

    fn query_params(request: &StatementRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", request.page.to_string()),
            ("pageSize", request.page_size.to_string()),
        ];

        let filter = &request.filter;
        if let Some(start_date) = filter.start_date {
            params.push(("startDate", start_date.to_string()));
        }
        if let Some(end_date) = filter.end_date {
            params.push(("endDate", end_date.to_string()));
        }
        if let Some(source_type) = filter.source_type {
            params.push(("sourceType", source_type.as_str().to_string()));
        }
        if let Some(invoice_id) = &filter.linked_invoice_id {
            params.push(("invoiceId", invoice_id.clone()));
        }
        params
    }
}

#[async_trait]
impl StatementFetcher for HttpStatementFetcher {
    async fn fetch_statement(
        &self,
        request: &StatementRequest,
    ) -> Result<AccountStatement, FetchError> {
        request.validate()?;

        let url = self.statement_url(request);
        tracing::debug!(%url, page = request.page, "fetching statement page");

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        Ok(response.json::<AccountStatement>().await?)
    }
}
