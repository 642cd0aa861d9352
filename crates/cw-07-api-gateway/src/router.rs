//! Route table and shared handler state.

use axum::routing::{get, patch, post, put};
use axum::Router;
use cw_01_case_lifecycle::CaseLifecycleApi;
use cw_02_evaluation_catalog::EvaluationCatalogApi;
use cw_03_notification_inbox::NotificationInbox;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{cases, evaluation, notifications, system};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cases: Arc<dyn CaseLifecycleApi>,
    pub catalog: Arc<dyn EvaluationCatalogApi>,
    pub inbox: Arc<dyn NotificationInbox>,
}

impl AppState {
    pub fn new(
        cases: Arc<dyn CaseLifecycleApi>,
        catalog: Arc<dyn EvaluationCatalogApi>,
        inbox: Arc<dyn NotificationInbox>,
    ) -> Self {
        Self {
            cases,
            catalog,
            inbox,
        }
    }
}

/// Build the full router with tracing and a per-request timeout.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(system::health_check))
        .route("/metrics", get(system::metrics))
        // Cases
        .route(
            "/cases/:kind",
            post(cases::create_case).get(cases::list_cases),
        )
        .route("/cases/:kind/:id", get(cases::get_case))
        .route("/cases/:kind/:id/status", put(cases::transition_status))
        .route("/cases/:kind/:id/assessment", put(cases::record_assessment))
        .route("/cases/:kind/:id/handler", put(cases::assign_handler))
        // Evaluation catalog
        .route(
            "/evaluation-configs",
            get(evaluation::list_configs).post(evaluation::create_config),
        )
        .route(
            "/evaluation-configs/:id",
            put(evaluation::replace_options).delete(evaluation::deactivate_config),
        )
        // Inbox
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/notifications/mark-all-read",
            patch(notifications::mark_all_read),
        )
        .route(
            "/notifications/:id",
            patch(notifications::mark_read).delete(notifications::delete_notification),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
