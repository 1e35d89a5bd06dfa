mod rules;

pub use rules::{Predicate, Rule, RuleSet, RuleSetError};

use super::domain::ApplicationRecord;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies a rule set to one record at a time.
#[derive(Debug, Clone, Default)]
pub struct ChecklistEvaluator {
    rules: RuleSet,
}

impl ChecklistEvaluator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// One result per rule, in rule-set order. Never fails.
    pub fn evaluate(&self, record: &ApplicationRecord) -> Vec<EvaluationResult> {
        self.rules
            .rules()
            .iter()
            .map(|rule| EvaluationResult {
                name: rule.name.clone(),
                status: RuleStatus::from_outcome(rule.passes(record)),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Passed,
    Failed,
}

impl RuleStatus {
    pub fn from_outcome(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleStatus::Passed => "Passed",
            RuleStatus::Failed => "Failed",
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, RuleStatus::Passed)
    }
}

/// Outcome of a single rule for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub name: String,
    pub status: RuleStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl ChecklistSummary {
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.failed == 0
    }
}

pub fn summarize(results: &[EvaluationResult]) -> ChecklistSummary {
    let passed = results
        .iter()
        .filter(|result| result.status.is_passed())
        .count();
    ChecklistSummary {
        passed,
        failed: results.len() - passed,
        total: results.len(),
    }
}
