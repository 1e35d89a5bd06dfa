//! Loan application checklist: the rule set, its evaluator, and the collaborators that feed
//! records in and render results out.
//!
//! A run is linear. An [`ApplicationSource`] supplies one [`ApplicationRecord`], the
//! [`ChecklistEvaluator`] maps it to ordered [`EvaluationResult`]s, and a presentation layer
//! (HTML dashboard, JSON route, CLI) renders them.

pub mod client;
pub mod domain;
pub mod evaluation;
pub mod render;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use client::HttpApplicationSource;
pub use domain::{ApplicationId, ApplicationRecord};
pub use evaluation::{
    summarize, ChecklistEvaluator, ChecklistSummary, EvaluationResult, Predicate, Rule, RuleSet,
    RuleSetError, RuleStatus,
};
pub use render::{render_dashboard, write_csv};
pub use router::checklist_router;
pub use service::{ChecklistRun, ChecklistService, FetchFailureView};
pub use source::{ApplicationSource, SourceError};
