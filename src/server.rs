use crate::actors::portfolio::{self, PortfolioMessage, PortfolioStats};
use crate::error::{PortfolioError, Result};
use crate::gallery::CategoryFilter;
use crate::pagination::PageRequest;
use crate::panels::PanelId;
use crate::render::{fallback_notice, search_results};
use crate::search::SearchQuery;
use crate::state::{FilterChange, Intent, ListKind, Tab};
use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use ractor::ActorRef;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub portfolio: ActorRef<PortfolioMessage>,
    pub start_time: Instant,
}

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PortfolioStats>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    #[serde(rename = "darkMode")]
    pub dark_mode: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub language: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl SearchParams {
    fn into_query(self) -> Result<SearchQuery> {
        Ok(SearchQuery {
            text: self.q,
            language: self.language,
            sort: self.sort.as_deref().unwrap_or_default().parse()?,
            order: self.order.as_deref().unwrap_or_default().parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchInputForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoteSearchParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    pub category: Option<String>,
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        let status = match &self {
            PortfolioError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PortfolioError::NotFound(_) => StatusCode::NOT_FOUND,
            PortfolioError::ActorError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Create the portfolio router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tabs/:tab", get(select_tab))
        .route("/navigate/:list/:request", get(navigate))
        .route("/search", get(search))
        .route("/search/input", post(search_input))
        .route("/search/remote", get(remote_search))
        .route("/gallery", get(gallery))
        .route("/panels/:panel", get(panel))
        .route("/theme/toggle", post(toggle_theme))
        .route("/health", get(health_check))
        .route("/livez", get(liveness_check))
        .route("/readyz", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: AppState, addr: &str) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Portfolio server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let view = portfolio::render(&state.portfolio, portfolio::CALL_TIMEOUT).await?;
    Ok(Html(view.document))
}

async fn select_tab(State(state): State<AppState>, Path(tab): Path<String>) -> Result<Html<String>> {
    let tab: Tab = tab.parse()?;
    let view = portfolio::dispatch(&state.portfolio, Intent::TabSelected(tab)).await?;
    Ok(Html(view.document))
}

async fn navigate(
    State(state): State<AppState>,
    Path((list, request)): Path<(String, String)>,
) -> Result<Html<String>> {
    let list: ListKind = list.parse()?;
    let request: PageRequest = request.parse()?;
    let view = portfolio::dispatch(&state.portfolio, Intent::Navigate { list, request }).await?;
    Ok(Html(view.document))
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Html<String>> {
    let query = params.into_query()?;
    portfolio::dispatch(&state.portfolio, Intent::TabSelected(Tab::Search)).await?;
    let view = portfolio::dispatch(
        &state.portfolio,
        Intent::FilterChanged(FilterChange::Replace(query)),
    )
    .await?;
    Ok(Html(view.document))
}

async fn search_input(
    State(state): State<AppState>,
    Form(form): Form<SearchInputForm>,
) -> Result<StatusCode> {
    portfolio::search_input(&state.portfolio, form.q)?;
    Ok(StatusCode::ACCEPTED)
}

async fn remote_search(
    State(state): State<AppState>,
    Query(params): Query<RemoteSearchParams>,
) -> Result<Html<String>> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Err(PortfolioError::InvalidRequest("Search query must not be empty".to_string()));
    }

    let results = portfolio::remote_search(&state.portfolio, query).await?;
    let notice = if results.is_fallback() {
        fallback_notice()
    } else {
        String::new()
    };
    Ok(Html(format!("{}{}", notice, search_results(&results.data, Utc::now()))))
}

async fn gallery(State(state): State<AppState>, Query(params): Query<GalleryParams>) -> Result<Html<String>> {
    let filter: CategoryFilter = params.category.as_deref().unwrap_or_default().parse()?;
    portfolio::dispatch(&state.portfolio, Intent::TabSelected(Tab::Gallery)).await?;
    let view = portfolio::dispatch(&state.portfolio, Intent::GalleryCategorySelected(filter)).await?;
    Ok(Html(view.document))
}

async fn panel(State(state): State<AppState>, Path(panel): Path<String>) -> Result<Html<String>> {
    let panel: PanelId = panel.parse()?;
    let view = portfolio::render(&state.portfolio, portfolio::CALL_TIMEOUT).await?;
    Ok(Html(view.panels.get(panel).unwrap_or_default().to_string()))
}

/// JSON for scripted clients, otherwise back to the page the form was on
async fn toggle_theme(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let view = portfolio::dispatch(&state.portfolio, Intent::ThemeToggled).await?;

    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));

    if wants_json {
        Ok(Json(ThemeResponse {
            dark_mode: view.dark_mode,
        })
        .into_response())
    } else {
        Ok(Redirect::to("/").into_response())
    }
}

/// Healthy with live data, degraded while serving fallback data
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    let (status, message, stats) = match portfolio::stats(&state.portfolio, Duration::from_secs(5)).await {
        Ok(stats) if stats.uses_fallback => (
            HealthStatus::Degraded,
            Some("Serving fallback data, GitHub API unavailable".to_string()),
            Some(stats),
        ),
        Ok(stats) => (HealthStatus::Healthy, None, Some(stats)),
        Err(e) => (HealthStatus::Unhealthy, Some(e.to_string()), None),
    };

    let status_code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        message,
        stats,
    };

    (status_code, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// Ready once the actor answers
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match portfolio::stats(&state.portfolio, Duration::from_secs(1)).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "ready": true }))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "ready": false, "message": e.to_string() })),
        ),
    }
}
