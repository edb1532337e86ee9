//! Soft failures.
//!
//! Steps with a soft failure policy log the cause and let the scenario go on.
//! The ledger keeps those swallowed failures so a runner can report the
//! verifications that passed without actually holding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A failure swallowed by a soft step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftFailure {
    /// Index of this failure within the scenario
    pub index: usize,
    /// Phrase of the step that swallowed it
    pub step: String,
    /// Logged message, including the original cause
    pub message: String,
}

impl fmt::Display for SoftFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}: {}", self.index + 1, self.step, self.message)
    }
}

/// Ledger of soft failures for one scenario
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftFailures {
    failures: Vec<SoftFailure>,
}

impl SoftFailures {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a swallowed failure
    pub fn record(&mut self, step: impl Into<String>, message: impl Into<String>) {
        let failure = SoftFailure {
            index: self.failures.len(),
            step: step.into(),
            message: message.into(),
        };
        self.failures.push(failure);
    }

    /// All recorded failures
    #[must_use]
    pub fn failures(&self) -> &[SoftFailure] {
        &self.failures
    }

    /// Number of recorded failures
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether nothing was swallowed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Multi-line summary, `None` when nothing was swallowed
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let mut out = format!("{} soft failure(s) did not fail the scenario:", self.len());
        for failure in &self.failures {
            out.push_str("\n  ");
            out.push_str(&failure.to_string());
        }
        Some(out)
    }
}
