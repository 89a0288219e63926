use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::domain::{AccountStatement, DEFAULT_PAGE_SIZE, FilterUpdate, PageCursor, StatementFilter};
use crate::fetch::{StatementFetcher, StatementRequest};

use super::TenantResolver;

/// Message shown when a load is attempted with no tenant selected.
pub const NO_TENANT_MESSAGE: &str = "No tenant selected";

/// Generic user-facing message for failed loads. The technical cause goes to
/// the diagnostic log, never to the user.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load transactions. Please try again.";

/// Where the view stands with respect to its one fetch operation.
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet, or no account context to request for
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded and the statement reflects it
    Loaded,
    /// The last fetch failed; carries the user-facing message
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadStatus::Error(_))
    }
}

/// Observable state of a [`StatementView`], published as a whole value on
/// every transition. The display layer reads this and nothing else.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub account_id: Option<String>,
    pub filter: StatementFilter,
    pub cursor: PageCursor,
    /// Last successfully loaded statement. Kept visible across failed
    /// reloads: stale data beats a blanked view.
    pub statement: Option<AccountStatement>,
    pub status: LoadStatus,
}

impl ViewState {
    /// Stable identities of the visible rows, for incremental rendering.
    pub fn entry_ids(&self) -> Vec<&str> {
        self.statement
            .as_ref()
            .map(|s| s.entry_ids())
            .unwrap_or_default()
    }
}

/// Stateful controller for one account's paginated, filterable statement.
///
/// Operations return immediately; fetches run on background tasks and their
/// outcome lands in the observable state, so calls must happen inside a
/// Tokio runtime. Clones share the same state.
///
/// Only the most recently issued load may mutate state. Each load takes a
/// sequence number; a settling response whose number is no longer the latest
/// is discarded, so out-of-order arrivals cannot roll the view back.
#[derive(Clone)]
pub struct StatementView {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: Arc<dyn StatementFetcher>,
    tenants: Arc<dyn TenantResolver>,
    state: watch::Sender<ViewState>,
    load_seq: AtomicU64,
}

impl StatementView {
    pub fn new(fetcher: Arc<dyn StatementFetcher>, tenants: Arc<dyn TenantResolver>) -> Self {
        Self::with_page_size(fetcher, tenants, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(
        fetcher: Arc<dyn StatementFetcher>,
        tenants: Arc<dyn TenantResolver>,
        page_size: u32,
    ) -> Self {
        let state = ViewState {
            cursor: PageCursor::new(page_size),
            ..ViewState::default()
        };
        let (tx, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                fetcher,
                tenants,
                state: tx,
                load_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Current state by value.
    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Receiver over state transitions; poll with `borrow` or await `changed`.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Bind the view to an account and load the first page. `initial` seeds
    /// the filter with externally supplied values, e.g. a linked-invoice id
    /// carried in from navigation.
    pub fn initialize(&self, account_id: impl Into<String>, initial: FilterUpdate) {
        let account_id = account_id.into();
        self.inner.state.send_modify(|state| {
            state.account_id = Some(account_id);
            state.filter = initial.apply(&state.filter);
            state.cursor.reset_to_first_page();
        });
        self.spawn_load();
    }

    /// Merge `update` into the current filter and reload from page 1.
    ///
    /// A filter change invalidates the meaning of "page N" under the old
    /// filter, so the cursor never survives it.
    pub fn change_filters(&self, update: FilterUpdate) {
        self.inner.state.send_modify(|state| {
            state.filter = update.apply(&state.filter);
            state.cursor.reset_to_first_page();
        });
        self.spawn_load();
    }

    /// Navigate to `page` and reload. Rejected while a load is in flight so a
    /// rapid pager click cannot queue overlapping requests.
    pub fn change_page(&self, page: u32) {
        if self.inner.state.borrow().status.is_loading() {
            tracing::debug!(page, "page change ignored while a load is in flight");
            return;
        }
        self.inner.state.send_modify(|state| state.cursor.set_page(page));
        self.spawn_load();
    }

    /// Re-issue the last request with filter and cursor unchanged. Only
    /// meaningful after a failure; otherwise a no-op.
    pub fn retry(&self) {
        if !self.inner.state.borrow().status.is_error() {
            return;
        }
        self.spawn_load();
    }

    /// Navigation-context notification: the linked-invoice query parameter
    /// changed. Routed through the regular filter merge, so pagination resets
    /// and a reload happens once an account is known.
    pub fn set_linked_invoice(&self, invoice_id: Option<String>) {
        self.change_filters(FilterUpdate::new().with_linked_invoice(invoice_id));
    }

    fn spawn_load(&self) {
        let inner = Arc::clone(&self.inner);

        let (account_id, page, page_size, filter) = {
            let state = inner.state.borrow();
            (
                state.account_id.clone(),
                state.cursor.current_page,
                state.cursor.page_size,
                state.filter.clone(),
            )
        };

        // No account context yet: a benign idle state, not an error.
        let Some(account_id) = account_id else {
            tracing::debug!("load skipped, no account resolved");
            return;
        };

        // No tenant is a precondition failure, not a transient one: surface it
        // synchronously and never touch the network.
        let Some(tenant_id) = inner.tenants.current_tenant_id() else {
            inner
                .state
                .send_modify(|state| state.status = LoadStatus::Error(NO_TENANT_MESSAGE.to_string()));
            return;
        };

        let request = StatementRequest {
            tenant_id,
            account_id,
            page,
            page_size,
            filter,
        };

        // Take the sequence number inside the state cell's critical section so
        // a settling response can never observe a half-issued load.
        let mut seq = 0;
        inner.state.send_modify(|state| {
            seq = inner.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = LoadStatus::Loading;
        });

        tokio::spawn(async move {
            let result = inner.fetcher.fetch_statement(&request).await;

            inner.state.send_modify(|state| {
                if inner.load_seq.load(Ordering::SeqCst) != seq {
                    // A newer load owns the view now; this response is stale.
                    tracing::debug!(seq, "discarding superseded statement response");
                    return;
                }
                match result {
                    Ok(statement) => {
                        state.cursor.apply_response(
                            statement.page,
                            statement.page_size,
                            statement.total_count,
                        );
                        state.statement = Some(statement);
                        state.status = LoadStatus::Loaded;
                    }
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            account_id = %request.account_id,
                            page = request.page,
                            "statement load failed"
                        );
                        state.status = LoadStatus::Error(LOAD_FAILED_MESSAGE.to_string());
                    }
                }
            });
        });
    }
}
