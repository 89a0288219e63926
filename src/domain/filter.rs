use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{LedgerEntry, SourceType};

/// Constraints applied to a statement fetch. Absent fields mean "no
/// constraint". Filters are immutable snapshots: applying a [`FilterUpdate`]
/// produces a new value, so a change is never partially visible mid-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementFilter {
    /// Earliest transaction date to include (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Latest transaction date to include (inclusive)
    pub end_date: Option<NaiveDate>,
    pub source_type: Option<SourceType>,
    /// Restrict to entries whose source reference equals this invoice id
    pub linked_invoice_id: Option<String>,
}

impl StatementFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.source_type.is_none()
            && self.linked_invoice_id.is_none()
    }

    /// Predicate an entry must satisfy to appear under this filter.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let date = entry.date_naive();
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        if let Some(source_type) = self.source_type {
            if entry.source_type != source_type {
                return false;
            }
        }
        if let Some(invoice_id) = &self.linked_invoice_id {
            if entry.source_reference_id.as_deref() != Some(invoice_id.as_str()) {
                return false;
            }
        }
        true
    }
}

/// A partial change to a [`StatementFilter`]. Each field distinguishes "leave
/// unchanged" (not given) from "clear" (given as `None`), so an update can
/// drop one constraint while keeping the rest.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    start_date: Option<Option<NaiveDate>>,
    end_date: Option<Option<NaiveDate>>,
    source_type: Option<Option<SourceType>>,
    linked_invoice_id: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_source_type(mut self, source_type: Option<SourceType>) -> Self {
        self.source_type = Some(source_type);
        self
    }

    pub fn with_linked_invoice(mut self, invoice_id: Option<String>) -> Self {
        self.linked_invoice_id = Some(invoice_id);
        self
    }

    /// Returns true when the update touches no field at all
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.source_type.is_none()
            && self.linked_invoice_id.is_none()
    }

    /// Merge into `current`, producing the next filter snapshot.
    pub fn apply(&self, current: &StatementFilter) -> StatementFilter {
        StatementFilter {
            start_date: self.start_date.unwrap_or(current.start_date),
            end_date: self.end_date.unwrap_or(current.end_date),
            source_type: self.source_type.unwrap_or(current.source_type),
            linked_invoice_id: self
                .linked_invoice_id
                .clone()
                .unwrap_or_else(|| current.linked_invoice_id.clone()),
        }
    }
}
