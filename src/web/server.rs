use std::sync::Arc;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::app::AppShell;
use crate::assistant::ChatError;
use crate::config::Config;
use crate::connection::ConnectionError;
use crate::pages::{self, Page};
use crate::premium::PremiumError;
use crate::recommend::engine::{dispatch, normalize};

/// Web UI server - アプリシェルのJSON API
/// Every screen of the app reads and drives the in-memory session through here
pub struct WebServer {
    shell: Arc<AppShell>,
    config: Arc<Config>,
}

#[derive(Clone)]
struct AppState {
    shell: Arc<AppShell>,
}

#[derive(Deserialize)]
struct TextQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
struct SelectRequest {
    id: u32,
}

#[derive(Deserialize)]
struct ChatRequest {
    text: String,
}

#[derive(Deserialize)]
struct PurchaseRequest {
    plan_id: String,
}

#[derive(Deserialize)]
struct ConnectRequest {
    query: String,
}

impl WebServer {
    pub fn new(shell: Arc<AppShell>, config: Arc<Config>) -> Self {
        Self { shell, config }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            shell: self.shell.clone(),
        };

        Router::new()
            .route("/", get(dashboard))
            .route("/api/pages/:page", get(api_page))
            .route("/api/servers", get(api_servers))
            .route("/api/servers/fastest", get(api_fastest))
            .route("/api/recommend", get(api_recommend))
            .route("/api/recommend/connect", post(api_connect_recommended))
            .route("/api/search", get(api_search))
            .route("/api/connection", get(api_connection))
            .route("/api/connection/toggle", post(api_toggle))
            .route("/api/connection/best", post(api_select_best))
            .route("/api/connection/select", post(api_select))
            .route("/api/chat", get(api_chat).post(api_chat_send))
            .route("/api/premium", get(api_premium))
            .route("/api/premium/purchase", post(api_purchase))
            .route("/api/premium/restore", post(api_restore))
            .route("/api/premium/reward-ad", post(api_reward_ad))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        if !self.config.web.enabled {
            info!("Web UI disabled");
            return Ok(());
        }

        let addr = format!("{}:{}", self.config.web.address, self.config.web.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("🌐 Web UI listening on http://{}", addr);
        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn serve(&self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

fn error(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(serde_json::json!({ "error": message.to_string() }))).into_response()
}

fn connection_error(e: ConnectionError) -> Response {
    let status = match e {
        ConnectionError::UnknownServer(_) => StatusCode::NOT_FOUND,
        ConnectionError::ServerOffline(_) => StatusCode::CONFLICT,
        ConnectionError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
    };
    warn!("🔌 {}", e);
    error(status, e)
}

/// Dashboard HTML - embedded single-page app
async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard.html"))
}

async fn api_page(State(state): State<AppState>, Path(page): Path<String>) -> Json<serde_json::Value> {
    Json(Page::from_tag(&page).render(&state.shell))
}

/// Server list narrowed by country/city text
async fn api_servers(
    State(state): State<AppState>,
    Query(params): Query<TextQuery>,
) -> Json<serde_json::Value> {
    let filter = params.q.unwrap_or_default();
    Json(pages::servers(&state.shell, &filter))
}

async fn api_fastest(State(state): State<AppState>) -> Response {
    match state.shell.catalog.find_fastest() {
        Some(server) => Json(server.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Server catalog is empty"),
    }
}

/// Raw recommendation call (quick actions pass fixed category tags)
async fn api_recommend(
    State(state): State<AppState>,
    Query(params): Query<TextQuery>,
) -> Json<serde_json::Value> {
    let query = params.q.unwrap_or_default();
    let normalized = normalize(&query);
    let category = dispatch(&normalized).map(|(keyword, category)| {
        serde_json::json!({ "keyword": keyword, "name": category.name() })
    });
    let results = state.shell.recommend(&query);
    Json(serde_json::json!({
        "query": normalized,
        "category": category,
        "results": results,
    }))
}

async fn api_connect_recommended(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Response {
    match state.shell.connect_recommended(&req.query) {
        Ok(Some((recommendation, status))) => Json(serde_json::json!({
            "recommendation": recommendation,
            "connection": status,
        }))
        .into_response(),
        Ok(None) => error(StatusCode::NOT_FOUND, "No server matches that request"),
        Err(e) => connection_error(e),
    }
}

/// Search box: validated user text
async fn api_search(State(state): State<AppState>, Query(params): Query<TextQuery>) -> Response {
    let raw = params.q.unwrap_or_default();
    match state.shell.search(&raw) {
        Ok(results) => Json(serde_json::json!({ "results": results })).into_response(),
        Err(e) => {
            warn!("🔎 Rejected search: {}", e);
            error(StatusCode::BAD_REQUEST, e)
        }
    }
}

async fn api_connection(State(state): State<AppState>) -> Response {
    Json(state.shell.connection.status()).into_response()
}

async fn api_toggle(State(state): State<AppState>) -> Response {
    Json(state.shell.connection.toggle()).into_response()
}

async fn api_select_best(State(state): State<AppState>) -> Response {
    match state.shell.connection.select_best() {
        Ok(status) => Json(status).into_response(),
        Err(e) => connection_error(e),
    }
}

async fn api_select(State(state): State<AppState>, Json(req): Json<SelectRequest>) -> Response {
    match state.shell.connection.select_server(req.id) {
        Ok(status) => Json(status).into_response(),
        Err(e) => connection_error(e),
    }
}

async fn api_chat(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(pages::chat(&state.shell))
}

async fn api_chat_send(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match state.shell.assistant.send(&req.text) {
        Ok(message) => (StatusCode::ACCEPTED, Json(message)).into_response(),
        Err(e @ ChatError::EmptyMessage) => error(StatusCode::BAD_REQUEST, e),
        Err(e @ ChatError::Busy) => error(StatusCode::CONFLICT, e),
    }
}

async fn api_premium(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(pages::premium(&state.shell))
}

async fn api_purchase(State(state): State<AppState>, Json(req): Json<PurchaseRequest>) -> Response {
    match state.shell.premium.purchase(&req.plan_id).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e @ PremiumError::UnknownPlan(_)) => error(StatusCode::NOT_FOUND, e),
        Err(e @ PremiumError::AlreadyProcessing) => error(StatusCode::CONFLICT, e),
    }
}

async fn api_restore(State(state): State<AppState>) -> Response {
    Json(state.shell.premium.restore().await).into_response()
}

async fn api_reward_ad(State(state): State<AppState>) -> Response {
    Json(state.shell.premium.watch_reward_ad()).into_response()
}
