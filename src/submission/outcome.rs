//! Settlement outcome generation.
//!
//! The integration service does not settle payments itself; it asks an
//! [`OutcomeGenerator`] what the settlement system would have said. The
//! randomized generator stands in for a real settlement system, and the
//! deterministic ones are used in tests and demos.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

use crate::config::SimulatorSettings;
use crate::models::DisbursementOutcome;

/// Decides the outcome of a submitted batch.
pub trait OutcomeGenerator: Send + Sync {
    /// Returns the outcome for `batch_id`.
    fn next_outcome(&self, batch_id: &str) -> DisbursementOutcome;
}

/// Randomized outcomes with a fixed percentage split.
#[derive(Debug, Clone, Copy)]
pub struct RandomOutcomeGenerator {
    success_percent: u8,
    retry_percent: u8,
}

impl RandomOutcomeGenerator {
    /// Creates a generator. Percentages are clamped so their sum never
    /// exceeds 100; the remainder is FAILED.
    pub fn new(success_percent: u8, retry_percent: u8) -> Self {
        let success_percent = success_percent.min(100);
        let retry_percent = retry_percent.min(100 - success_percent);
        Self {
            success_percent,
            retry_percent,
        }
    }

    /// Maps a roll in `0..100` onto an outcome.
    fn classify(&self, roll: u8) -> DisbursementOutcome {
        if roll < self.success_percent {
            DisbursementOutcome::Success
        } else if roll < self.success_percent + self.retry_percent {
            DisbursementOutcome::Retry
        } else {
            DisbursementOutcome::Failed
        }
    }
}

impl Default for RandomOutcomeGenerator {
    fn default() -> Self {
        Self::new(80, 10)
    }
}

impl From<SimulatorSettings> for RandomOutcomeGenerator {
    fn from(settings: SimulatorSettings) -> Self {
        Self::new(settings.success_percent, settings.retry_percent)
    }
}

impl OutcomeGenerator for RandomOutcomeGenerator {
    fn next_outcome(&self, _batch_id: &str) -> DisbursementOutcome {
        let roll: u8 = rand::rng().random_range(0..100);
        self.classify(roll)
    }
}

/// Always returns the same outcome.
#[derive(Debug, Clone)]
pub struct FixedOutcome(pub DisbursementOutcome);

impl OutcomeGenerator for FixedOutcome {
    fn next_outcome(&self, _batch_id: &str) -> DisbursementOutcome {
        self.0.clone()
    }
}

/// Replays a script of outcomes, then repeats the fallback.
#[derive(Debug)]
pub struct ScriptedOutcomes {
    script: Mutex<VecDeque<DisbursementOutcome>>,
    fallback: DisbursementOutcome,
}

impl ScriptedOutcomes {
    /// Creates a generator that returns `script` in order, then `fallback`.
    pub fn new(script: Vec<DisbursementOutcome>, fallback: DisbursementOutcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
        }
    }
}

impl OutcomeGenerator for ScriptedOutcomes {
    fn next_outcome(&self, _batch_id: &str) -> DisbursementOutcome {
        match self.script.lock() {
            Ok(mut script) => script.pop_front().unwrap_or_else(|| self.fallback.clone()),
            Err(_) => self.fallback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries_for_default_split() {
        let generator = RandomOutcomeGenerator::default();
        assert_eq!(generator.classify(0), DisbursementOutcome::Success);
        assert_eq!(generator.classify(79), DisbursementOutcome::Success);
        assert_eq!(generator.classify(80), DisbursementOutcome::Retry);
        assert_eq!(generator.classify(89), DisbursementOutcome::Retry);
        assert_eq!(generator.classify(90), DisbursementOutcome::Failed);
        assert_eq!(generator.classify(99), DisbursementOutcome::Failed);
    }

    #[test]
    fn test_percentages_are_clamped() {
        let generator = RandomOutcomeGenerator::new(90, 50);
        assert_eq!(generator.classify(95), DisbursementOutcome::Retry);
        let all_success = RandomOutcomeGenerator::new(200, 10);
        assert_eq!(all_success.classify(99), DisbursementOutcome::Success);
    }

    #[test]
    fn test_random_generator_only_yields_known_outcomes() {
        let generator = RandomOutcomeGenerator::default();
        for _ in 0..500 {
            let outcome = generator.next_outcome("B");
            assert!(!matches!(outcome, DisbursementOutcome::Unrecognized(_)));
        }
    }

    #[test]
    fn test_scripted_outcomes_then_fallback() {
        let generator = ScriptedOutcomes::new(
            vec![DisbursementOutcome::Retry, DisbursementOutcome::Failed],
            DisbursementOutcome::Success,
        );
        assert_eq!(generator.next_outcome("B1"), DisbursementOutcome::Retry);
        assert_eq!(generator.next_outcome("B2"), DisbursementOutcome::Failed);
        assert_eq!(generator.next_outcome("B3"), DisbursementOutcome::Success);
        assert_eq!(generator.next_outcome("B4"), DisbursementOutcome::Success);
    }
}
