use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LedgerEntry;

/// A bounded, paginated window over an account's ledger entries plus summary
/// balances. A statement is replaced wholesale on every successful fetch,
/// never merged or appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    pub account_id: String,
    pub account_name: String,
    /// Statement period bounds; absent when the statement is not period-bounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    /// Entries in server-defined order
    #[serde(rename = "transactions")]
    pub entries: Vec<LedgerEntry>,
    /// Total number of entries matching the request, across all pages
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl AccountStatement {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable row identities in display order, for incremental rendering
    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}
