use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{ApplicationId, ApplicationRecord};
use super::evaluation::{summarize, ChecklistEvaluator, ChecklistSummary, EvaluationResult};
use super::source::{ApplicationSource, SourceError};

/// Service composing a record source with the checklist evaluator.
pub struct ChecklistService<S> {
    source: Arc<S>,
    evaluator: Arc<ChecklistEvaluator>,
    default_application_id: ApplicationId,
}

impl<S> ChecklistService<S>
where
    S: ApplicationSource + 'static,
{
    pub fn new(
        source: Arc<S>,
        evaluator: ChecklistEvaluator,
        default_application_id: ApplicationId,
    ) -> Self {
        Self {
            source,
            evaluator: Arc::new(evaluator),
            default_application_id,
        }
    }

    pub fn default_application_id(&self) -> &ApplicationId {
        &self.default_application_id
    }

    pub fn evaluator(&self) -> &ChecklistEvaluator {
        &self.evaluator
    }

    /// Fetch and evaluate a record, surfacing fetch failures to the caller.
    pub async fn evaluate_remote(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<EvaluationResult>, SourceError> {
        let record = self.source.fetch(application_id).await?;
        Ok(self.evaluate_record(application_id, &record))
    }

    /// Fetch and evaluate a record for presentation. A fetch failure is logged and yields a run
    /// with no results, so callers always have something to render.
    pub async fn run(&self, application_id: Option<ApplicationId>) -> ChecklistRun {
        let application_id = application_id.unwrap_or_else(|| self.default_application_id.clone());

        let (results, error) = match self.evaluate_remote(&application_id).await {
            Ok(results) => (results, None),
            Err(err) => {
                warn!(
                    application_id = %application_id,
                    kind = err.kind(),
                    error = %err,
                    "failed to fetch application record"
                );
                (Vec::new(), Some(FetchFailureView::from(&err)))
            }
        };

        ChecklistRun {
            summary: summarize(&results),
            application_id,
            evaluated_at: Utc::now(),
            results,
            error,
        }
    }

    fn evaluate_record(
        &self,
        application_id: &ApplicationId,
        record: &ApplicationRecord,
    ) -> Vec<EvaluationResult> {
        let results = self.evaluator.evaluate(record);
        let summary = summarize(&results);
        debug!(
            application_id = %application_id,
            passed = summary.passed,
            failed = summary.failed,
            "checklist evaluated"
        );
        results
    }
}

/// Everything a presentation layer needs from one fetch-and-evaluate cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistRun {
    pub application_id: ApplicationId,
    pub evaluated_at: DateTime<Utc>,
    pub results: Vec<EvaluationResult>,
    pub summary: ChecklistSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchFailureView>,
}

/// Public description of a fetch failure. Upstream detail stays in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailureView {
    pub kind: &'static str,
    pub message: &'static str,
}

impl From<&SourceError> for FetchFailureView {
    fn from(err: &SourceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.public_message(),
        }
    }
}
