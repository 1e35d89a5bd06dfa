use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::checklist::domain::{ApplicationId, ApplicationRecord};
use crate::checklist::evaluation::{ChecklistEvaluator, RuleSet};
use crate::checklist::service::ChecklistService;
use crate::checklist::source::{ApplicationSource, SourceError};
use crate::checklist::{checklist_router, EvaluationResult, RuleStatus};

pub(super) const UPSTREAM_URL: &str = "http://127.0.0.1:9/internal/records?token=s3cret";
pub(super) const APPLICATION_ID: &str = "67339ae56d5231c1a2c63639";

pub(super) fn application_id() -> ApplicationId {
    ApplicationId(APPLICATION_ID.to_string())
}

pub(super) fn record(value: Value) -> ApplicationRecord {
    ApplicationRecord::from_value(value).expect("fixture is a JSON object")
}

pub(super) fn compliant_record() -> ApplicationRecord {
    record(json!({
        "isValuationFeePaid": true,
        "isUkResident": true,
        "riskRating": "Medium",
        "loanRequired": 50,
        "purchasePrice": 100,
    }))
}

pub(super) fn evaluator() -> ChecklistEvaluator {
    ChecklistEvaluator::new(RuleSet::standard())
}

pub(super) fn statuses(results: &[EvaluationResult]) -> Vec<RuleStatus> {
    results.iter().map(|result| result.status).collect()
}

pub(super) fn status_of(results: &[EvaluationResult], name: &str) -> RuleStatus {
    results
        .iter()
        .find(|result| result.name == name)
        .map(|result| result.status)
        .unwrap_or_else(|| panic!("rule '{name}' missing from results"))
}

#[derive(Default, Clone)]
pub(super) struct MemorySource {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    requests: Arc<Mutex<Vec<ApplicationId>>>,
}

impl MemorySource {
    pub(super) fn with_record(id: ApplicationId, record: ApplicationRecord) -> Self {
        let source = Self::default();
        source
            .records
            .lock()
            .expect("source mutex poisoned")
            .insert(id, record);
        source
    }

    pub(super) fn requests(&self) -> Vec<ApplicationId> {
        self.requests.lock().expect("source mutex poisoned").clone()
    }
}

impl ApplicationSource for MemorySource {
    async fn fetch(&self, id: &ApplicationId) -> Result<ApplicationRecord, SourceError> {
        self.requests
            .lock()
            .expect("source mutex poisoned")
            .push(id.clone());
        let found = self
            .records
            .lock()
            .expect("source mutex poisoned")
            .get(id)
            .cloned();
        found.ok_or_else(|| SourceError::NotFound(id.clone()))
    }
}

#[derive(Default, Clone, Copy)]
pub(super) struct UnreachableSource;

impl ApplicationSource for UnreachableSource {
    async fn fetch(&self, _id: &ApplicationId) -> Result<ApplicationRecord, SourceError> {
        Err(SourceError::Transport(format!(
            "error sending request for url ({UPSTREAM_URL}/x): connection refused"
        )))
    }
}

/// Fails the first `failures` fetches, then serves the compliant record.
#[derive(Default)]
pub(super) struct FlakySource {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakySource {
    pub(super) fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ApplicationSource for FlakySource {
    async fn fetch(&self, _id: &ApplicationId) -> Result<ApplicationRecord, SourceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(SourceError::Timeout)
        } else {
            Ok(compliant_record())
        }
    }
}

pub(super) fn build_service<S>(source: S) -> ChecklistService<S>
where
    S: ApplicationSource + 'static,
{
    ChecklistService::new(Arc::new(source), evaluator(), application_id())
}

pub(super) fn router_with_source<S>(source: S) -> axum::Router
where
    S: ApplicationSource + 'static,
{
    checklist_router(Arc::new(build_service(source)))
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_str(&body).expect("json payload")
}

pub(super) fn count_result_rows(html: &str) -> usize {
    html.matches("<td class=").count()
}
