//! Path, query and body types for transaction routes

use ezpay_core::time::parse_bound;
use ezpay_core::{
    Counterparty, DateRange, NewTransaction, TransactionFilter, TransactionId,
    TransactionStatus, TransactionType, TransferKind,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PAGE_SIZE: usize = 50;

pub fn parse_kind(kind: &str) -> ApiResult<TransferKind> {
    kind.parse().map_err(ApiError::bad_request)
}

pub fn parse_id(id: &str) -> ApiResult<TransactionId> {
    id.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid transaction id: {}", id)))
}

fn parse_status(status: &str) -> ApiResult<TransactionStatus> {
    status.parse().map_err(ApiError::bad_request)
}

/// Query string for the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub counterparty: Option<String>,
    pub account: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`, inclusive
    pub from: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`, inclusive of the whole day
    pub to: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListParams {
    pub fn filter(&self) -> ApiResult<TransactionFilter> {
        let status = non_empty(&self.status).map(parse_status).transpose()?;

        let bound = |value: &Option<String>, name: &str, end_of_day: bool| {
            non_empty(value)
                .map(|v| {
                    parse_bound(v, end_of_day).ok_or_else(|| {
                        ApiError::bad_request(format!("Invalid {} date: {}", name, v))
                    })
                })
                .transpose()
        };

        Ok(TransactionFilter {
            status,
            counterparty: non_empty(&self.counterparty).map(str::to_string),
            account: non_empty(&self.account).map(str::to_string),
            range: DateRange {
                start: bound(&self.from, "from", false)?,
                end: bound(&self.to, "to", true)?,
            },
        })
    }

    /// `(limit, offset)`; unparsable values fall back to the defaults
    pub fn page(&self) -> (usize, usize) {
        let limit = self
            .limit
            .as_deref()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = self
            .offset
            .as_deref()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0);
        (limit, offset)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<String>,
}

impl RecentParams {
    /// Requested limit, or `default` when absent or unparsable
    pub fn limit(&self, default: usize) -> usize {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(default)
    }
}

/// Body of `POST /api/:kind/transactions`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub counterparty: Counterparty,
    pub amount: Decimal,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    /// Bank form re-entry of the recipient account; checked when present
    #[serde(default)]
    pub confirm_account_number: Option<String>,
}

impl CreateTransactionRequest {
    pub fn into_new_transaction(self) -> NewTransaction {
        NewTransaction {
            counterparty: self.counterparty,
            amount: self.amount,
            remarks: self.remarks,
            transaction_type: self.transaction_type.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    pub fn status(&self) -> ApiResult<TransactionStatus> {
        parse_status(self.status.trim())
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub pin: String,
}
