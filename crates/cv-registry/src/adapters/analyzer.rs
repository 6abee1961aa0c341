//! # Outcome Analyzer Adapters
//!
//! `SimulatedAnalyzer` stands in for the external computation service and
//! draws a random verdict, like the original front-end did. Deterministic
//! tests use `FixedOutcomeAnalyzer`.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{AnalysisError, Outcome, OutcomeLabel};
use crate::ports::OutcomeAnalyzer;

/// Confidence range the simulated analysis reports, inclusive.
pub const SIMULATED_CONFIDENCE_RANGE: std::ops::RangeInclusive<u8> = 60..=99;

/// Random-verdict analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAnalyzer;

impl SimulatedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, _payload: &[u8]) -> Result<Outcome, AnalysisError> {
        let mut rng = rand::thread_rng();
        let label = *OutcomeLabel::ALL
            .choose(&mut rng)
            .unwrap_or(&OutcomeLabel::Neutral);
        let confidence = rng.gen_range(SIMULATED_CONFIDENCE_RANGE);
        Ok(Outcome { label, confidence })
    }
}

/// Analyzer that always returns the same outcome. For reproducible tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcomeAnalyzer {
    outcome: Outcome,
}

impl FixedOutcomeAnalyzer {
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome }
    }

    /// A favorable verdict at 87% confidence.
    pub fn favorable() -> Self {
        Self::new(Outcome {
            label: OutcomeLabel::Favorable,
            confidence: 87,
        })
    }
}

#[async_trait]
impl OutcomeAnalyzer for FixedOutcomeAnalyzer {
    async fn analyze(&self, _payload: &[u8]) -> Result<Outcome, AnalysisError> {
        Ok(self.outcome)
    }
}
