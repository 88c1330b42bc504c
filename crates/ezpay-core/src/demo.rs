//! Sample history loaded when `registry.seed_demo_data` is on

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::models::{Counterparty, TransactionRecord};
use crate::registry::TransactionRegistry;
use crate::types::{TransactionStatus, TransactionType, TransferKind};

const DEMO_SENDER_ACCOUNT: &str = "1234567890";
const DEMO_SENDER_UPI: &str = "alice@upi";

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

pub fn bank_history() -> Vec<TransactionRecord> {
    let bank = |id, account: &str, ifsc: &str, name: &str, amount: i64, remarks: &str, ts| {
        TransactionRecord {
            id,
            counterparty: Counterparty::Bank {
                recipient_account_number: account.to_string(),
                ifsc_code: ifsc.to_string(),
                recipient_name: name.to_string(),
                sender_account_number: Some(DEMO_SENDER_ACCOUNT.to_string()),
            },
            amount: Decimal::from(amount),
            remarks: Some(remarks.to_string()),
            status: TransactionStatus::Success,
            transaction_type: TransactionType::Debit,
            timestamp: ts,
            reference_number: None,
        }
    };

    vec![
        bank(
            1,
            "0987654321",
            "ABCD0123456",
            "John Doe",
            1500,
            "Grocery shopping",
            at(2024, 1, 15, 10, 30),
        ),
        bank(
            2,
            "1122334455",
            "WXYZ0987654",
            "Alice",
            2500,
            "Rent payment",
            at(2024, 1, 14, 14, 20),
        ),
    ]
}

pub fn upi_history() -> Vec<TransactionRecord> {
    let upi = |id, upi_id: &str, amount: i64, kind, status, remarks: &str, ts, reference: &str| {
        TransactionRecord {
            id,
            counterparty: Counterparty::Upi {
                upi_id: upi_id.to_string(),
                sender_upi_id: Some(DEMO_SENDER_UPI.to_string()),
            },
            amount: Decimal::from(amount),
            remarks: Some(remarks.to_string()),
            status,
            transaction_type: kind,
            timestamp: ts,
            reference_number: Some(reference.to_string()),
        }
    };

    vec![
        upi(
            1,
            "john@icici",
            450,
            TransactionType::Debit,
            TransactionStatus::Success,
            "Dinner split",
            at(2024, 1, 16, 20, 5),
            "UPI20240116482913",
        ),
        upi(
            2,
            "bob@okaxis",
            1200,
            TransactionType::Credit,
            TransactionStatus::Success,
            "Refund",
            at(2024, 1, 15, 9, 45),
            "UPI20240115107734",
        ),
        upi(
            3,
            "shop@paytm",
            799,
            TransactionType::Debit,
            TransactionStatus::Failed,
            "Headphones",
            at(2024, 1, 13, 18, 12),
            "UPI20240113650021",
        ),
    ]
}

/// Import the sample history matching the registry's rail
pub fn seed(registry: &TransactionRegistry) -> CoreResult<usize> {
    let records = match registry.kind() {
        TransferKind::Upi => upi_history(),
        TransferKind::Bank => bank_history(),
    };
    let count = records.len();
    for record in records {
        registry.import(record)?;
    }
    log::info!("[{}] seeded {} demo transactions", registry.kind(), count);
    Ok(count)
}
