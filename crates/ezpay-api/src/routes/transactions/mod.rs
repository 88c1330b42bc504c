//! Transaction routes - one set per transfer rail
//!
//! Features:
//! - Create transfers after form validation
//! - List with status, counterparty, account and date filters plus pagination
//! - Settle pending transfers, directly or behind a PIN check
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - params.rs: Path, query and body types

pub mod api;
pub mod params;

pub use api::{
    api_create_transaction,
    api_delete_transaction,
    api_process_transaction,
    api_recent_transactions,
    api_transaction_detail,
    api_transaction_summary,
    api_transactions,
    api_update_status,
    api_verify_transaction,
};
