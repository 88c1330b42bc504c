//! Outcome sources decide how `process` resolves a pending transaction

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::types::TransactionStatus;

/// Produces the terminal status for a pending transaction
pub trait OutcomeSource: Send + Sync {
    fn resolve(&self) -> TransactionStatus;
}

/// Coin flip with a fixed success probability
pub struct RandomOutcome {
    rng: Mutex<StdRng>,
    success_probability: f64,
}

impl RandomOutcome {
    /// Reproducible outcomes from `seed`
    pub fn seeded(seed: u64, success_probability: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), success_probability)
    }

    /// Outcomes seeded from OS entropy
    pub fn from_entropy(success_probability: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), success_probability)
    }

    /// NaN counts as never succeeding
    fn with_rng(rng: StdRng, success_probability: f64) -> Self {
        let success_probability = if success_probability.is_nan() {
            0.0
        } else {
            success_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: Mutex::new(rng),
            success_probability,
        }
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }
}

impl OutcomeSource for RandomOutcome {
    fn resolve(&self) -> TransactionStatus {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        if rng.gen_bool(self.success_probability) {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        }
    }
}

/// Always resolves to the same status
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub TransactionStatus);

impl OutcomeSource for FixedOutcome {
    fn resolve(&self) -> TransactionStatus {
        self.0
    }
}
