//! Core transaction registry and business logic

pub mod demo;
pub mod error;
pub mod models;
pub mod outcome;
pub mod registry;
pub mod time;
pub mod types;
pub mod validation;

use ezpay_config::RegistryConfig;
use std::sync::Arc;

pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{
    Counterparty, NewTransaction, RegistryStats, TransactionFilter, TransactionId,
    TransactionRecord, TransactionsResponse,
};
pub use outcome::{FixedOutcome, OutcomeSource, RandomOutcome};
pub use registry::TransactionRegistry;
pub use time::{Clock, DateRange, ManualClock, SystemClock};
pub use types::{TransactionStatus, TransactionType, TransferKind};

/// One registry per transfer rail
#[derive(Debug, Clone)]
pub struct Registries {
    pub upi: Arc<TransactionRegistry>,
    pub bank: Arc<TransactionRegistry>,
}

impl Registries {
    pub fn new(upi: TransactionRegistry, bank: TransactionRegistry) -> Self {
        Self {
            upi: Arc::new(upi),
            bank: Arc::new(bank),
        }
    }

    /// Build both registries from config, seeding demo history when enabled
    pub fn from_config(config: &RegistryConfig) -> CoreResult<Self> {
        let bank_config = RegistryConfig {
            // Keep the two outcome streams independent under a fixed seed
            rng_seed: config.rng_seed.map(|s| s.wrapping_add(0x5eed)),
            ..config.clone()
        };
        let registries = Self::new(
            TransactionRegistry::from_config(TransferKind::Upi, config),
            TransactionRegistry::from_config(TransferKind::Bank, &bank_config),
        );

        if config.seed_demo_data {
            demo::seed(&registries.upi)?;
            demo::seed(&registries.bank)?;
        }

        Ok(registries)
    }

    pub fn get(&self, kind: TransferKind) -> &Arc<TransactionRegistry> {
        match kind {
            TransferKind::Upi => &self.upi,
            TransferKind::Bank => &self.bank,
        }
    }
}
