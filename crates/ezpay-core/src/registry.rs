//! In-memory transaction registry
//!
//! One registry holds the records of a single transfer rail, most recent
//! first. Every read hands out clones; the only mutable field of a stored
//! record is its status.

use chrono::{DateTime, Utc};
use ezpay_config::RegistryConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CoreError, CoreResult};
use crate::models::{
    NewTransaction, RegistryStats, TransactionFilter, TransactionId, TransactionRecord,
};
use crate::outcome::{OutcomeSource, RandomOutcome};
use crate::time::{Clock, DateRange, SystemClock};
use crate::types::{TransactionStatus, TransferKind};

/// Attempts at drawing a fresh reference suffix before falling back to the id
const REFERENCE_ATTEMPTS: usize = 16;

/// Registry state guarded by a single lock
#[derive(Debug)]
struct RegistryData {
    /// Most recent first
    records: Vec<TransactionRecord>,
    next_id: TransactionId,
}

impl Default for RegistryData {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl RegistryData {
    fn position(&self, id: TransactionId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// Authoritative store of transfers for one rail
pub struct TransactionRegistry {
    kind: TransferKind,
    data: RwLock<RegistryData>,
    outcome: Arc<dyn OutcomeSource>,
    clock: Arc<dyn Clock>,
    reference_rng: Mutex<StdRng>,
    enforce_terminal_status: bool,
}

impl std::fmt::Debug for TransactionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionRegistry")
            .field("kind", &self.kind)
            .field("len", &self.len())
            .field("enforce_terminal_status", &self.enforce_terminal_status)
            .finish()
    }
}

impl TransactionRegistry {
    /// Create an empty registry with wall-clock time and an 80% coin flip
    pub fn new(kind: TransferKind) -> Self {
        Self {
            kind,
            data: RwLock::new(RegistryData::default()),
            outcome: Arc::new(RandomOutcome::from_entropy(0.8)),
            clock: Arc::new(SystemClock),
            reference_rng: Mutex::new(StdRng::from_entropy()),
            enforce_terminal_status: false,
        }
    }

    /// Create a registry from the `registry` config section
    pub fn from_config(kind: TransferKind, config: &RegistryConfig) -> Self {
        let registry = Self::new(kind).with_terminal_enforcement(config.enforce_terminal_status);
        match config.rng_seed {
            // Offset the reference stream so it does not mirror the outcome stream
            Some(seed) => registry
                .with_outcome(Arc::new(RandomOutcome::seeded(seed, config.success_probability)))
                .with_reference_seed(seed.wrapping_add(1)),
            None => registry.with_outcome(Arc::new(RandomOutcome::from_entropy(
                config.success_probability,
            ))),
        }
    }

    pub fn with_outcome(mut self, outcome: Arc<dyn OutcomeSource>) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_reference_seed(mut self, seed: u64) -> Self {
        self.reference_rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Refuse status updates that move a SUCCESS/FAILED record elsewhere
    pub fn with_terminal_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_terminal_status = enforce;
        self
    }

    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    pub fn enforces_terminal_status(&self) -> bool {
        self.enforce_terminal_status
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    fn filtered<F>(&self, predicate: F) -> Vec<TransactionRecord>
    where
        F: Fn(&TransactionRecord) -> bool,
    {
        self.read()
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    // ==================== Mutations ====================

    /// Record a new PENDING transfer at the head of the list
    pub fn create(&self, new: NewTransaction) -> CoreResult<TransactionRecord> {
        if new.counterparty.kind() != self.kind {
            return Err(CoreError::validation(
                "counterparty",
                format!("Expected a {} counterparty", self.kind),
            ));
        }
        if new.amount <= Decimal::ZERO {
            return Err(CoreError::validation("amount", "Amount must be greater than zero"));
        }
        if new.counterparty.identifier().trim().is_empty() {
            return Err(CoreError::validation(
                "counterparty",
                "Counterparty identifier is required",
            ));
        }

        let timestamp = self.clock.now();
        let mut data = self.write();

        let id = data.next_id;
        data.next_id += 1;

        let reference_number = match self.kind {
            TransferKind::Upi => Some(self.reference_number(&data, id, timestamp)),
            TransferKind::Bank => None,
        };

        let record = TransactionRecord {
            id,
            counterparty: new.counterparty,
            amount: new.amount,
            remarks: new.remarks.filter(|r| !r.trim().is_empty()),
            status: TransactionStatus::Pending,
            transaction_type: new.transaction_type,
            timestamp,
            reference_number,
        };

        data.records.insert(0, record.clone());
        log::info!("[{}] created transaction {}", self.kind, record.summary());
        Ok(record)
    }

    /// `UPI` + creation date + six random digits, unique within the registry
    fn reference_number(
        &self,
        data: &RegistryData,
        id: TransactionId,
        at: DateTime<Utc>,
    ) -> String {
        let date = at.format("%Y%m%d");
        let taken = |candidate: &str| {
            data.records
                .iter()
                .any(|r| r.reference_number.as_deref() == Some(candidate))
        };

        let mut rng = self.reference_rng.lock().unwrap_or_else(|e| e.into_inner());
        for _ in 0..REFERENCE_ATTEMPTS {
            let candidate = format!("UPI{}{:06}", date, rng.gen_range(0..1_000_000u32));
            if !taken(&candidate) {
                return candidate;
            }
        }
        // Ids never repeat, and the longer suffix cannot clash with a six-digit one
        format!("UPI{}{:06}{}", date, rng.gen_range(0..1_000_000u32), id)
    }

    /// Append a historical record at the tail, keeping its status and timestamp
    pub fn import(&self, record: TransactionRecord) -> CoreResult<TransactionRecord> {
        if record.kind() != self.kind {
            return Err(CoreError::validation(
                "counterparty",
                format!("Expected a {} counterparty", self.kind),
            ));
        }
        if record.amount <= Decimal::ZERO {
            return Err(CoreError::validation("amount", "Amount must be greater than zero"));
        }

        let mut data = self.write();
        if data.position(record.id).is_some() {
            return Err(CoreError::DuplicateEntry {
                entry: format!("{} transaction {}", self.kind, record.id),
            });
        }
        if let Some(reference) = record.reference_number.as_deref() {
            if data
                .records
                .iter()
                .any(|r| r.reference_number.as_deref() == Some(reference))
            {
                return Err(CoreError::DuplicateEntry {
                    entry: format!("reference number {}", reference),
                });
            }
        }

        data.next_id = data.next_id.max(record.id + 1);
        data.records.push(record.clone());
        log::debug!("[{}] imported transaction {}", self.kind, record.summary());
        Ok(record)
    }

    /// Set the status of an existing record
    pub fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> CoreResult<TransactionRecord> {
        let mut data = self.write();
        let idx = data
            .position(id)
            .ok_or(CoreError::TransactionNotFound { id })?;

        let record = &mut data.records[idx];
        let from = record.status;
        if self.enforce_terminal_status && from.is_terminal() && from != status {
            return Err(CoreError::InvalidStatusTransition { id, from, to: status });
        }

        record.status = status;
        log::info!("[{}] transaction {} status {} -> {}", self.kind, id, from, status);
        Ok(record.clone())
    }

    /// Settle a PENDING record using the outcome source
    pub fn process(&self, id: TransactionId) -> CoreResult<TransactionRecord> {
        let mut data = self.write();
        let idx = data
            .position(id)
            .ok_or(CoreError::TransactionNotFound { id })?;

        let record = &mut data.records[idx];
        if !record.is_pending() {
            return Err(CoreError::AlreadyProcessed {
                id,
                status: record.status,
            });
        }

        record.status = self.outcome.resolve();
        log::info!("[{}] processed transaction {} -> {}", self.kind, id, record.status);
        Ok(record.clone())
    }

    /// Remove a record; returns whether anything was removed
    pub fn delete(&self, id: TransactionId) -> bool {
        let mut data = self.write();
        match data.position(id) {
            Some(idx) => {
                data.records.remove(idx);
                log::info!("[{}] deleted transaction {}", self.kind, id);
                true
            }
            None => false,
        }
    }

    // ==================== Queries ====================

    /// Snapshot of every record, most recent first
    pub fn all(&self) -> Vec<TransactionRecord> {
        self.read().records.clone()
    }

    pub fn get(&self, id: TransactionId) -> Option<TransactionRecord> {
        self.read().records.iter().find(|r| r.id == id).cloned()
    }

    pub fn by_status(&self, status: TransactionStatus) -> Vec<TransactionRecord> {
        self.filtered(|r| r.status == status)
    }

    /// Case-insensitive search over counterparty identifier and name
    pub fn by_counterparty(&self, term: &str) -> Vec<TransactionRecord> {
        let term = term.trim().to_lowercase();
        self.filtered(|r| r.counterparty.matches(&term))
    }

    /// Records where `account` is either the sender or the recipient
    pub fn by_account(&self, account: &str) -> Vec<TransactionRecord> {
        let account = account.trim();
        self.filtered(|r| r.counterparty.involves_account(account))
    }

    /// Inclusive on both ends
    pub fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TransactionRecord> {
        self.in_range(&DateRange::new(start, end))
    }

    pub fn in_range(&self, range: &DateRange) -> Vec<TransactionRecord> {
        self.filtered(|r| range.contains(&r.timestamp))
    }

    /// Filtered page of records plus the total number of matches
    pub fn query(
        &self,
        filter: &TransactionFilter,
        limit: usize,
        offset: usize,
    ) -> (Vec<TransactionRecord>, usize) {
        let data = self.read();
        let matching: Vec<&TransactionRecord> =
            data.records.iter().filter(|r| filter.matches(r)).collect();
        let total = matching.len();
        let page = matching.into_iter().skip(offset).take(limit).cloned().collect();
        (page, total)
    }

    /// The `limit` most recent records
    pub fn recent(&self, limit: usize) -> Vec<TransactionRecord> {
        self.read().records.iter().take(limit).cloned().collect()
    }

    /// Net of SUCCESS records: CREDIT adds, DEBIT subtracts
    pub fn total_amount(&self) -> Decimal {
        self.read()
            .records
            .iter()
            .filter(|r| r.status == TransactionStatus::Success)
            .map(|r| r.signed_amount())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegistryStats {
        let data = self.read();
        let count = |s: TransactionStatus| data.records.iter().filter(|r| r.status == s).count();
        RegistryStats {
            kind: self.kind,
            total_count: data.records.len(),
            pending_count: count(TransactionStatus::Pending),
            success_count: count(TransactionStatus::Success),
            failed_count: count(TransactionStatus::Failed),
            total_amount: data
                .records
                .iter()
                .filter(|r| r.status == TransactionStatus::Success)
                .map(|r| r.signed_amount())
                .sum(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Counterparty;
    use crate::outcome::FixedOutcome;
    use crate::time::ManualClock;
    use crate::types::TransactionType;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn upi_registry() -> (TransactionRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let registry = TransactionRegistry::new(TransferKind::Upi)
            .with_clock(clock.clone())
            .with_reference_seed(11);
        (registry, clock)
    }

    fn amount(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_create_is_pending_and_first() {
        let (registry, _) = upi_registry();
        registry.create(NewTransaction::upi("alice@upi", amount(10))).unwrap();
        let record = registry
            .create(NewTransaction::upi("john@bank", amount(100)))
            .unwrap();

        assert_eq!(record.status, TransactionStatus::Pending);
        assert_eq!(record.transaction_type, TransactionType::Debit);
        assert_eq!(record.timestamp, start());
        assert_eq!(registry.all()[0], record);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let (registry, _) = upi_registry();
        let a = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        let b = registry.create(NewTransaction::upi("b@upi", amount(1))).unwrap();
        registry.delete(b.id);
        let c = registry.create(NewTransaction::upi("c@upi", amount(1))).unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_upi_reference_numbers() {
        let (registry, _) = upi_registry();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
            let reference = r.reference_number.unwrap();
            assert!(reference.starts_with("UPI20240301"));
            assert_eq!(reference.len(), "UPI20240301".len() + 6);
            assert!(seen.insert(reference));
        }
    }

    #[test]
    fn test_bank_records_have_no_reference() {
        let registry = TransactionRegistry::new(TransferKind::Bank);
        let r = registry
            .create(NewTransaction::bank("0987654321", "ABCD0123456", "John", amount(5)))
            .unwrap();
        assert!(r.reference_number.is_none());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (registry, _) = upi_registry();
        assert!(matches!(
            registry.create(NewTransaction::upi("a@upi", amount(0))),
            Err(CoreError::ValidationError { .. })
        ));
        assert!(registry.create(NewTransaction::upi("a@upi", amount(-3))).is_err());
        assert!(registry.create(NewTransaction::upi("  ", amount(3))).is_err());
        assert!(registry
            .create(NewTransaction::bank("0987654321", "ABCD0123456", "John", amount(5)))
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_blank_remarks_are_dropped() {
        let (registry, _) = upi_registry();
        let r = registry
            .create(NewTransaction::upi("a@upi", amount(1)).with_remarks("   "))
            .unwrap();
        assert_eq!(r.remarks, None);
        let r = registry
            .create(NewTransaction::upi("a@upi", amount(1)).with_remarks("rent"))
            .unwrap();
        assert_eq!(r.remarks.as_deref(), Some("rent"));
    }

    #[test]
    fn test_reads_are_copies() {
        let (registry, _) = upi_registry();
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        let mut copy = registry.get(r.id).unwrap();
        copy.status = TransactionStatus::Success;
        let mut all = registry.all();
        all[0].amount = amount(999);
        assert_eq!(registry.get(r.id).unwrap().status, TransactionStatus::Pending);
        assert_eq!(registry.get(r.id).unwrap().amount, amount(1));
    }

    #[test]
    fn test_get_missing_is_none() {
        let (registry, _) = upi_registry();
        assert!(registry.get(42).is_none());
    }

    #[test]
    fn test_update_status() {
        let (registry, _) = upi_registry();
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        let updated = registry.update_status(r.id, TransactionStatus::Success).unwrap();
        assert_eq!(updated.status, TransactionStatus::Success);
        assert_eq!(registry.get(r.id).unwrap().status, TransactionStatus::Success);

        assert_eq!(
            registry.update_status(999, TransactionStatus::Failed),
            Err(CoreError::TransactionNotFound { id: 999 })
        );
    }

    #[test]
    fn test_terminal_status_is_permissive_by_default() {
        let (registry, _) = upi_registry();
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        registry.update_status(r.id, TransactionStatus::Success).unwrap();
        let back = registry.update_status(r.id, TransactionStatus::Pending).unwrap();
        assert_eq!(back.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_terminal_status_enforced() {
        let (registry, _) = upi_registry();
        let registry = registry.with_terminal_enforcement(true);
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        registry.update_status(r.id, TransactionStatus::Failed).unwrap();
        // Re-asserting the same terminal status is a no-op
        registry.update_status(r.id, TransactionStatus::Failed).unwrap();
        assert_eq!(
            registry.update_status(r.id, TransactionStatus::Pending),
            Err(CoreError::InvalidStatusTransition {
                id: r.id,
                from: TransactionStatus::Failed,
                to: TransactionStatus::Pending,
            })
        );
        assert_eq!(registry.get(r.id).unwrap().status, TransactionStatus::Failed);
    }

    #[test]
    fn test_process_with_fixed_outcomes() {
        let (registry, _) = upi_registry();
        let ok = registry.with_outcome(Arc::new(FixedOutcome(TransactionStatus::Success)));
        let r = ok.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        assert_eq!(ok.process(r.id).unwrap().status, TransactionStatus::Success);

        let failing = TransactionRegistry::new(TransferKind::Upi)
            .with_outcome(Arc::new(FixedOutcome(TransactionStatus::Failed)));
        let r = failing.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        assert_eq!(failing.process(r.id).unwrap().status, TransactionStatus::Failed);
    }

    #[test]
    fn test_process_errors() {
        let (registry, _) = upi_registry();
        let registry = registry.with_outcome(Arc::new(FixedOutcome(TransactionStatus::Success)));
        assert_eq!(registry.process(5), Err(CoreError::TransactionNotFound { id: 5 }));

        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        registry.process(r.id).unwrap();
        assert_eq!(
            registry.process(r.id),
            Err(CoreError::AlreadyProcessed {
                id: r.id,
                status: TransactionStatus::Success,
            })
        );
    }

    #[test]
    fn test_process_success_rate_with_seed() {
        let registry = TransactionRegistry::new(TransferKind::Upi)
            .with_outcome(Arc::new(RandomOutcome::seeded(2024, 0.8)));
        let ids: Vec<_> = (0..1000)
            .map(|_| registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap().id)
            .collect();
        for id in ids {
            registry.process(id).unwrap();
        }
        let successes = registry.by_status(TransactionStatus::Success).len();
        let fraction = successes as f64 / 1000.0;
        assert!((0.75..=0.85).contains(&fraction), "success fraction {fraction}");
        assert!(registry.by_status(TransactionStatus::Pending).is_empty());
    }

    #[test]
    fn test_by_status_preserves_order() {
        let (registry, _) = upi_registry();
        let ids: Vec<_> = (0..6)
            .map(|i| registry.create(NewTransaction::upi("a@upi", amount(i + 1))).unwrap().id)
            .collect();
        for id in ids.iter().step_by(2) {
            registry.update_status(*id, TransactionStatus::Success).unwrap();
        }

        let expected: Vec<_> = registry
            .all()
            .into_iter()
            .filter(|r| r.status == TransactionStatus::Success)
            .collect();
        assert_eq!(registry.by_status(TransactionStatus::Success), expected);
        assert_eq!(expected.len(), 3);
        assert_eq!(registry.by_status(TransactionStatus::Pending).len(), 3);
        assert!(registry.by_status(TransactionStatus::Failed).is_empty());
    }

    #[test]
    fn test_by_counterparty() {
        let registry = TransactionRegistry::new(TransferKind::Bank);
        registry
            .create(NewTransaction::bank("0987654321", "ABCD0123456", "John Doe", amount(5)))
            .unwrap();
        registry
            .create(NewTransaction::bank("1122334455", "WXYZ0987654", "Alice", amount(7)))
            .unwrap();

        assert_eq!(registry.by_counterparty("JOHN").len(), 1);
        assert_eq!(registry.by_counterparty("11223").len(), 1);
        assert_eq!(registry.by_counterparty("o").len(), 1);
        assert_eq!(registry.by_counterparty("").len(), 2);
        assert!(registry.by_counterparty("bob").is_empty());
    }

    #[test]
    fn test_by_account() {
        let registry = TransactionRegistry::new(TransferKind::Bank);
        let mut new = NewTransaction::bank("0987654321", "ABCD0123456", "John", amount(5));
        if let Counterparty::Bank { sender_account_number, .. } = &mut new.counterparty {
            *sender_account_number = Some("1234567890".to_string());
        }
        registry.create(new).unwrap();
        registry
            .create(NewTransaction::bank("1122334455", "WXYZ0987654", "Alice", amount(7)))
            .unwrap();

        assert_eq!(registry.by_account("1234567890").len(), 1);
        assert_eq!(registry.by_account("1122334455").len(), 1);
        assert!(registry.by_account("12345").is_empty());
    }

    #[test]
    fn test_by_date_range_inclusive() {
        let (registry, clock) = upi_registry();
        let first = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        clock.advance(Duration::days(1));
        let second = registry.create(NewTransaction::upi("b@upi", amount(1))).unwrap();
        clock.advance(Duration::days(1));
        let third = registry.create(NewTransaction::upi("c@upi", amount(1))).unwrap();

        let hits = registry.by_date_range(first.timestamp, second.timestamp);
        assert_eq!(hits.iter().map(|r| r.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let only_last = registry.by_date_range(third.timestamp, third.timestamp);
        assert_eq!(only_last.len(), 1);

        let none = registry.by_date_range(
            start() - Duration::days(10),
            start() - Duration::days(5),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_query_pages_filtered_records() {
        let (registry, _) = upi_registry();
        for i in 0..10 {
            let r = registry.create(NewTransaction::upi("a@upi", amount(i + 1))).unwrap();
            if i % 2 == 0 {
                registry.update_status(r.id, TransactionStatus::Success).unwrap();
            }
        }
        registry.create(NewTransaction::upi("zed@upi", amount(1))).unwrap();

        let filter = TransactionFilter {
            status: Some(TransactionStatus::Success),
            ..TransactionFilter::default()
        };
        let (page, total) = registry.query(&filter, 2, 1);
        assert_eq!(total, 5);
        assert_eq!(page, registry.by_status(TransactionStatus::Success)[1..3].to_vec());

        let filter = TransactionFilter {
            counterparty: Some("ZED".to_string()),
            ..TransactionFilter::default()
        };
        let (page, total) = registry.query(&filter, 50, 0);
        assert_eq!(total, 1);
        assert_eq!(page[0].counterparty.identifier(), "zed@upi");
    }

    #[test]
    fn test_recent() {
        let (registry, _) = upi_registry();
        for i in 0..8 {
            registry.create(NewTransaction::upi("a@upi", amount(i + 1))).unwrap();
        }
        let recent = registry.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent, registry.all()[..5].to_vec());
        assert_eq!(registry.recent(100).len(), 8);
        assert!(registry.recent(0).is_empty());
    }

    #[test]
    fn test_total_amount() {
        let (registry, _) = upi_registry();
        let debit = registry
            .create(NewTransaction::upi("a@upi", amount(100)))
            .unwrap();
        let credit = registry
            .create(NewTransaction::upi("b@upi", amount(50)).with_type(TransactionType::Credit))
            .unwrap();
        registry.update_status(debit.id, TransactionStatus::Success).unwrap();
        registry.update_status(credit.id, TransactionStatus::Success).unwrap();
        assert_eq!(registry.total_amount(), amount(-50));

        // PENDING and FAILED records are ignored
        registry.create(NewTransaction::upi("c@upi", amount(1000))).unwrap();
        let failed = registry
            .create(NewTransaction::upi("d@upi", amount(70)).with_type(TransactionType::Credit))
            .unwrap();
        registry.update_status(failed.id, TransactionStatus::Failed).unwrap();
        assert_eq!(registry.total_amount(), amount(-50));

        let stats = registry.stats();
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.failed_count, 1);
        assert_eq!(stats.total_amount, amount(-50));
    }

    #[test]
    fn test_delete() {
        let (registry, _) = upi_registry();
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        assert!(registry.delete(r.id));
        assert!(registry.get(r.id).is_none());
        assert!(!registry.delete(r.id));
        assert!(!registry.delete(12345));
    }

    #[test]
    fn test_import_appends_history() {
        let (registry, _) = upi_registry();
        let live = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();

        let mut old = live.clone();
        old.id = 40;
        old.status = TransactionStatus::Success;
        old.timestamp = start() - Duration::days(30);
        old.reference_number = Some("UPI20240131000001".to_string());
        registry.import(old.clone()).unwrap();

        let all = registry.all();
        assert_eq!(all.last().unwrap(), &old);
        assert_eq!(all[0].id, live.id);

        assert!(matches!(registry.import(old), Err(CoreError::DuplicateEntry { .. })));

        let next = registry.create(NewTransaction::upi("b@upi", amount(1))).unwrap();
        assert_eq!(next.id, 41);
    }

    #[test]
    fn test_from_config_seeded() {
        let config = RegistryConfig {
            success_probability: 1.0,
            rng_seed: Some(9),
            enforce_terminal_status: true,
            ..RegistryConfig::default()
        };
        let registry = TransactionRegistry::from_config(TransferKind::Upi, &config);
        assert!(registry.enforces_terminal_status());
        let r = registry.create(NewTransaction::upi("a@upi", amount(1))).unwrap();
        assert_eq!(registry.process(r.id).unwrap().status, TransactionStatus::Success);
    }
}
