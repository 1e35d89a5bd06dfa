use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::super::domain::ApplicationRecord;

/// Condition a rule checks against a record. Every variant fails closed: a missing or
/// wrong-typed field evaluates to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Field holds the JSON boolean `true`.
    FlagSet { field: String },
    /// Field holds a string equal to `expected`, compared case-sensitively.
    TextEquals { field: String, expected: String },
    /// `numerator / denominator * 100` is strictly below `limit_percent`. Both fields must be
    /// non-zero numbers.
    RatioBelow {
        numerator: String,
        denominator: String,
        limit_percent: f64,
    },
}

impl Predicate {
    pub fn evaluate(&self, record: &ApplicationRecord) -> bool {
        match self {
            Predicate::FlagSet { field } => record.flag(field) == Some(true),
            Predicate::TextEquals { field, expected } => {
                record.text(field) == Some(expected.as_str())
            }
            Predicate::RatioBelow {
                numerator,
                denominator,
                limit_percent,
            } => match (record.amount(numerator), record.amount(denominator)) {
                (Some(top), Some(bottom)) => (top / bottom) * 100.0 < *limit_percent,
                _ => false,
            },
        }
    }
}

/// Named checklist entry. The name is the display label and is unique within a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Rule {
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }

    pub fn flag_set(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(
            name,
            Predicate::FlagSet {
                field: field.into(),
            },
        )
    }

    pub fn text_equals(
        name: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Predicate::TextEquals {
                field: field.into(),
                expected: expected.into(),
            },
        )
    }

    pub fn ratio_below(
        name: impl Into<String>,
        numerator: impl Into<String>,
        denominator: impl Into<String>,
        limit_percent: f64,
    ) -> Self {
        Self::new(
            name,
            Predicate::RatioBelow {
                numerator: numerator.into(),
                denominator: denominator.into(),
                limit_percent,
            },
        )
    }

    pub fn passes(&self, record: &ApplicationRecord) -> bool {
        self.predicate.evaluate(record)
    }
}

/// Ordered, validated collection of rules. Order is the display order of the checklist.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(RuleSetError::EmptyName);
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(RuleSetError::DuplicateName(rule.name.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The mortgage checklist applied when no rule file is configured.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Rule::flag_set("Valuation Fee Paid", "isValuationFeePaid"),
                Rule::flag_set("UK Resident", "isUkResident"),
                Rule::text_equals("Risk Rating Medium", "riskRating", "Medium"),
                Rule::ratio_below("LTV Below 60%", "loanRequired", "purchasePrice", 60.0),
            ],
        }
    }

    /// Parse a JSON array of rules, e.g.
    /// `[{"name": "UK Resident", "kind": "flag_set", "field": "isUkResident"}]`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RuleSetError> {
        let rules: Vec<Rule> = serde_json::from_reader(reader)?;
        Self::new(rules)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        let file = File::open(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Loads `path` when given, otherwise falls back to [`RuleSet::standard`].
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self, RuleSetError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("rule names must not be empty")]
    EmptyName,
    #[error("duplicate rule name '{0}'")]
    DuplicateName(String),
    #[error("unable to parse rule set: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read rule set {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
