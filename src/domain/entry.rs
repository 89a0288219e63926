use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// Debit entry from a completed ride (increases the amount owed)
    RideCharge,
    /// Credit entry from a customer payment (decreases the amount owed)
    Payment,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::RideCharge => "RideCharge",
            SourceType::Payment => "Payment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ridecharge" => Some(SourceType::RideCharge),
            "payment" => Some(SourceType::Payment),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One transaction line in an account statement.
/// Entries are immutable once received; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    /// When the transaction occurred
    pub transaction_date: DateTime<Utc>,
    /// Ledger account label (e.g. "AccountsReceivable", "ServiceRevenue", "Cash")
    pub ledger_account: String,
    /// Debit amount, never negative
    pub debit_amount: Decimal,
    /// Credit amount, never negative
    pub credit_amount: Decimal,
    pub description: String,
    pub source_type: SourceType,
    /// Reference to the source document (ride or payment), when one exists
    pub source_reference_id: Option<String>,
}

impl LedgerEntry {
    /// Returns true for entries that increase the amount owed
    pub fn is_charge(&self) -> bool {
        matches!(self.source_type, SourceType::RideCharge)
    }

    /// Net movement of this entry: debit minus credit
    pub fn net_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }

    /// Calendar date of the transaction
    pub fn date_naive(&self) -> NaiveDate {
        self.transaction_date.date_naive()
    }
}
