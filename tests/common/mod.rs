// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

use saldo::{
    AccountStatement, FetchError, FixedTenant, LedgerEntry, SourceType, StatementFetcher,
    StatementRequest, StatementView, TenantResolver,
};

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to parse a date string into a midday DateTime<Utc>
pub fn parse_datetime(date_str: &str) -> DateTime<Utc> {
    parse_date(date_str).and_hms_opt(12, 0, 0).unwrap().and_utc()
}

fn entry(
    id: &str,
    date: &str,
    source_type: SourceType,
    debit: Decimal,
    credit: Decimal,
) -> LedgerEntry {
    LedgerEntry {
        id: id.to_string(),
        transaction_date: parse_datetime(date),
        ledger_account: "AccountsReceivable".to_string(),
        debit_amount: debit,
        credit_amount: credit,
        description: format!("{source_type} {id}"),
        source_type,
        source_reference_id: None,
    }
}

pub fn ride_charge(id: &str, date: &str, amount: &str) -> LedgerEntry {
    entry(
        id,
        date,
        SourceType::RideCharge,
        amount.parse().unwrap(),
        Decimal::ZERO,
    )
}

pub fn payment(id: &str, date: &str, amount: &str) -> LedgerEntry {
    entry(
        id,
        date,
        SourceType::Payment,
        Decimal::ZERO,
        amount.parse().unwrap(),
    )
}

/// Statement page fixture carrying the given rows out of `total_count`.
pub fn statement_page(
    account_id: &str,
    page: u32,
    page_size: u32,
    total_count: u64,
    entries: Vec<LedgerEntry>,
) -> AccountStatement {
    AccountStatement {
        account_id: account_id.to_string(),
        account_name: "Acme Logistics".to_string(),
        period_start: None,
        period_end: None,
        opening_balance: Decimal::ZERO,
        closing_balance: Decimal::ZERO,
        entries,
        total_count,
        page,
        page_size,
    }
}

/// A page of `count` generated ride charges.
pub fn generated_page(
    account_id: &str,
    page: u32,
    page_size: u32,
    total_count: u64,
    count: usize,
) -> AccountStatement {
    let entries = (0..count)
        .map(|i| ride_charge(&format!("txn-{page}-{i}"), "2024-03-01", "10.00"))
        .collect();
    statement_page(account_id, page, page_size, total_count, entries)
}

/// Resolver for tests that exercise the missing-tenant precondition.
pub struct NoTenant;

impl TenantResolver for NoTenant {
    fn current_tenant_id(&self) -> Option<String> {
        None
    }
}

/// View wired to the given fetcher and a fixed tenant.
pub fn view_with(fetcher: Arc<dyn StatementFetcher>, tenant: &str) -> StatementView {
    StatementView::new(fetcher, Arc::new(FixedTenant(tenant.to_string())))
}

/// Let every task that is ready to run settle. On the single-threaded test
/// runtime this drains spawned loads whose responses have been resolved.
pub async fn drain_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Fetcher that answers each call immediately from a scripted queue of
/// results, recording every request it sees.
pub struct QueuedFetcher {
    calls: Mutex<Vec<StatementRequest>>,
    responses: Mutex<VecDeque<Result<AccountStatement, FetchError>>>,
}

impl QueuedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub fn push_ok(&self, statement: AccountStatement) {
        self.responses.lock().unwrap().push_back(Ok(statement));
    }

    pub fn push_err(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// All requests seen so far, in issue order.
    pub fn calls(&self) -> Vec<StatementRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StatementFetcher for QueuedFetcher {
    async fn fetch_statement(
        &self,
        request: &StatementRequest,
    ) -> Result<AccountStatement, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Other(anyhow!("no scripted response left"))))
    }
}

/// An in-flight request handed to the test by [`ManualFetcher`]; the test
/// decides when and with what it settles.
pub struct PendingFetch {
    pub request: StatementRequest,
    respond: oneshot::Sender<Result<AccountStatement, FetchError>>,
}

impl PendingFetch {
    pub fn resolve(self, result: Result<AccountStatement, FetchError>) {
        let _ = self.respond.send(result);
    }
}

/// Fetcher whose responses are resolved manually, so requests can be held in
/// flight and completed out of order.
pub struct ManualFetcher {
    calls: Mutex<Vec<StatementRequest>>,
    pending_tx: mpsc::UnboundedSender<PendingFetch>,
}

impl ManualFetcher {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingFetch>) {
        let (pending_tx, pending_rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                pending_tx,
            }),
            pending_rx,
        )
    }

    pub fn calls(&self) -> Vec<StatementRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StatementFetcher for ManualFetcher {
    async fn fetch_statement(
        &self,
        request: &StatementRequest,
    ) -> Result<AccountStatement, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        let (respond, settled) = oneshot::channel();
        self.pending_tx
            .send(PendingFetch {
                request: request.clone(),
                respond,
            })
            .expect("test dropped the pending receiver");
        settled
            .await
            .expect("test dropped a pending fetch without resolving it")
    }
}
