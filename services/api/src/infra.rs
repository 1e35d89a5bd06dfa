use loan_checklist::checklist::{
    ChecklistEvaluator, ChecklistService, HttpApplicationSource, RuleSet, RuleSetError,
};
use loan_checklist::config::ChecklistConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Rule file precedence: command-line flag, then `CHECKLIST_RULES_PATH`, then the built-in set.
pub(crate) fn load_rule_set(
    override_path: Option<&Path>,
    config: &ChecklistConfig,
) -> Result<RuleSet, RuleSetError> {
    RuleSet::from_optional_path(override_path.or(config.rules_path.as_deref()))
}

pub(crate) fn http_checklist_service(
    config: &ChecklistConfig,
    rules: RuleSet,
) -> ChecklistService<HttpApplicationSource> {
    ChecklistService::new(
        Arc::new(HttpApplicationSource::from_config(config)),
        ChecklistEvaluator::new(rules),
        config.application_id.clone(),
    )
}
