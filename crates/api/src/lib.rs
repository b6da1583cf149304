mod page;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use paper_client::{CancellationToken, ClientConfig, DataClient, ViewLoader};
use paper_core::{ViewError, ViewState};
use paper_observability::AppMetrics;
use paper_render::{render_question_paper, OUTPUT_FILE_NAME};
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct ApiState {
    pub client: DataClient,
    pub metrics: Arc<AppMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    backend_url: String,
    metrics: paper_observability::MetricsSnapshot,
}

/// Builds the router with backend settings taken from the environment.
pub fn build_app() -> Result<Router> {
    build_app_with(ClientConfig::from_env()?)
}

pub fn build_app_with(config: ClientConfig) -> Result<Router> {
    let state = ApiState {
        client: DataClient::new(config)?,
        metrics: AppMetrics::shared(),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/view/:data_id", get(view_page))
        .route("/view/:data_id/parts", get(view_parts))
        .route("/view/:data_id/pdf", get(view_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        backend_url: state.client.config().backend_url.to_string(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

/// Loads one view. The fetch is cancelled if the request future is dropped, e.g. when
/// the client disconnects mid-flight.
async fn load_view(state: &ApiState, data_id: &str) -> ViewState {
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let loader = ViewLoader::new(state.client.clone(), state.metrics.clone());
    loader.load(data_id, &cancel).await;
    loader.state()
}

async fn view_page(State(state): State<ApiState>, Path(data_id): Path<String>) -> Response {
    let view = load_view(&state, &data_id).await;
    let status = match view {
        ViewState::Error(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Html(page::render_view(&data_id, &view))).into_response()
}

async fn view_parts(State(state): State<ApiState>, Path(data_id): Path<String>) -> Response {
    let view = load_view(&state, &data_id).await;
    match view.partition() {
        Some(partition) => (StatusCode::OK, Json(partition)).into_response(),
        None => view_error_response(view.error().unwrap_or(ViewError::Transport)),
    }
}

async fn view_pdf(State(state): State<ApiState>, Path(data_id): Path<String>) -> Response {
    let view = load_view(&state, &data_id).await;
    let Some(partition) = view.partition() else {
        return view_error_response(view.error().unwrap_or(ViewError::Transport));
    };

    match render_question_paper(&partition) {
        Ok(rendered) => {
            state.metrics.observe_export(rendered.pages);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{OUTPUT_FILE_NAME}\""),
                    ),
                ],
                rendered.bytes,
            )
                .into_response()
        }
        Err(render_error) => {
            error!(error = %render_error, data_id = %data_id, "pdf export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "export_failed",
                    "message": render_error.to_string()
                })),
            )
                .into_response()
        }
    }
}

fn view_error_response(view_error: ViewError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "error": view_error,
            "message": view_error.to_string()
        })),
    )
        .into_response()
}
