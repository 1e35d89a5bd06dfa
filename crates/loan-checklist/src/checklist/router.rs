use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::domain::ApplicationId;
use super::render::render_dashboard;
use super::service::{ChecklistRun, ChecklistService};
use super::source::ApplicationSource;

/// Router builder exposing the HTML dashboard and its JSON counterpart.
pub fn checklist_router<S>(service: Arc<ChecklistService<S>>) -> Router
where
    S: ApplicationSource + 'static,
{
    Router::new()
        .route("/", get(dashboard_handler::<S>))
        .route("/api/v1/checklist", get(checklist_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChecklistQuery {
    pub(crate) application_id: Option<String>,
}

impl ChecklistQuery {
    fn application_id(self) -> Option<ApplicationId> {
        self.application_id
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(ApplicationId)
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<ChecklistService<S>>>,
    Query(query): Query<ChecklistQuery>,
) -> Html<String>
where
    S: ApplicationSource + 'static,
{
    let run = service.run(query.application_id()).await;
    Html(render_dashboard(&run))
}

pub(crate) async fn checklist_handler<S>(
    State(service): State<Arc<ChecklistService<S>>>,
    Query(query): Query<ChecklistQuery>,
) -> Json<ChecklistRun>
where
    S: ApplicationSource + 'static,
{
    Json(service.run(query.application_id()).await)
}
