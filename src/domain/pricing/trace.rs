//! Human-readable calculation breakdown

use serde::{Deserialize, Serialize};

/// Ordered list of arithmetic steps taken during one calculation.
///
/// Steps are appended in evaluation order and never reordered, so two
/// calculations over identical inputs produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationTrace {
    steps: Vec<String>,
}

impl CalculationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Append every step of another trace, keeping its order
    pub fn extend(&mut self, other: CalculationTrace) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether any step contains the given text
    pub fn mentions(&self, needle: &str) -> bool {
        self.steps.iter().any(|s| s.contains(needle))
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

impl From<CalculationTrace> for Vec<String> {
    fn from(trace: CalculationTrace) -> Self {
        trace.into_steps()
    }
}
