//! Core data models for the registry

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::DateRange;
use super::types::{TransactionStatus, TransactionType, TransferKind};

/// Registry-assigned transaction identifier
pub type TransactionId = u64;

/// The other side of a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Counterparty {
    /// UPI handle (e.g., "john@icici")
    #[serde(rename_all = "camelCase")]
    Upi {
        upi_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender_upi_id: Option<String>,
    },
    /// Bank account identified by account number and IFSC code
    #[serde(rename_all = "camelCase")]
    Bank {
        recipient_account_number: String,
        ifsc_code: String,
        recipient_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender_account_number: Option<String>,
    },
}

impl Counterparty {
    /// Payment rail of this counterparty
    pub fn kind(&self) -> TransferKind {
        match self {
            Counterparty::Upi { .. } => TransferKind::Upi,
            Counterparty::Bank { .. } => TransferKind::Bank,
        }
    }

    /// Primary identifier: UPI id or recipient account number
    pub fn identifier(&self) -> &str {
        match self {
            Counterparty::Upi { upi_id, .. } => upi_id,
            Counterparty::Bank { recipient_account_number, .. } => recipient_account_number,
        }
    }

    /// Human-readable recipient name, when the rail carries one
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Counterparty::Upi { .. } => None,
            Counterparty::Bank { recipient_name, .. } => Some(recipient_name),
        }
    }

    /// Case-insensitive substring match on identifier or display name.
    /// `term_lower` must already be lowercased.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.identifier().to_lowercase().contains(term_lower)
            || self
                .display_name()
                .map_or(false, |name| name.to_lowercase().contains(term_lower))
    }

    /// Exact match against either side of the transfer
    pub fn involves_account(&self, account: &str) -> bool {
        match self {
            Counterparty::Upi { upi_id, sender_upi_id } => {
                upi_id.eq_ignore_ascii_case(account)
                    || sender_upi_id
                        .as_deref()
                        .map_or(false, |s| s.eq_ignore_ascii_case(account))
            }
            Counterparty::Bank {
                recipient_account_number,
                sender_account_number,
                ..
            } => {
                recipient_account_number == account
                    || sender_account_number.as_deref() == Some(account)
            }
        }
    }
}

/// A single UPI or bank transfer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub counterparty: Counterparty,
    /// Amount in INR, always positive
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub status: TransactionStatus,
    pub transaction_type: TransactionType,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// UPI only: `UPI` + creation date + random suffix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}

impl TransactionRecord {
    pub fn kind(&self) -> TransferKind {
        self.counterparty.kind()
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Amount with sign applied: CREDIT positive, DEBIT negative
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Credit => self.amount,
            TransactionType::Debit => -self.amount,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let who = self
            .counterparty
            .display_name()
            .unwrap_or_else(|| self.counterparty.identifier());
        format!(
            "#{} {} {} {} ({})",
            self.id, self.transaction_type, self.amount, who, self.status
        )
    }
}

/// Caller-supplied fields for a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub counterparty: Counterparty,
    pub amount: Decimal,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// UPI debit to `upi_id`
    pub fn upi(upi_id: &str, amount: Decimal) -> Self {
        Self {
            counterparty: Counterparty::Upi {
                upi_id: upi_id.to_string(),
                sender_upi_id: None,
            },
            amount,
            remarks: None,
            transaction_type: TransactionType::Debit,
        }
    }

    /// Bank debit to `recipient_account_number`
    pub fn bank(
        recipient_account_number: &str,
        ifsc_code: &str,
        recipient_name: &str,
        amount: Decimal,
    ) -> Self {
        Self {
            counterparty: Counterparty::Bank {
                recipient_account_number: recipient_account_number.to_string(),
                ifsc_code: ifsc_code.to_string(),
                recipient_name: recipient_name.to_string(),
                sender_account_number: None,
            },
            amount,
            remarks: None,
            transaction_type: TransactionType::Debit,
        }
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    pub fn with_remarks(mut self, remarks: &str) -> Self {
        self.remarks = Some(remarks.to_string());
        self
    }
}

/// Listing filters; every populated field must match
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    /// Case-insensitive substring of counterparty identifier or name
    pub counterparty: Option<String>,
    /// Exact sender or recipient account
    pub account: Option<String>,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self.counterparty.as_deref().map_or(true, |term| {
                record.counterparty.matches(&term.trim().to_lowercase())
            })
            && self
                .account
                .as_deref()
                .map_or(true, |acc| record.counterparty.involves_account(acc.trim()))
            && self.range.contains(&record.timestamp)
    }
}

/// Transactions list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionRecord>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Registry statistics for the summary endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub kind: TransferKind,
    pub total_count: usize,
    pub pending_count: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// Net of SUCCESS records (CREDIT minus DEBIT)
    pub total_amount: Decimal,
}
