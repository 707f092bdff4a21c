pub mod auth;
pub mod auth_handlers;
pub mod buyers;
pub mod content;
pub mod extract;
pub mod farmers;
pub mod harvests;
pub mod inventory;
pub mod sales;
pub mod seedlings;
pub mod types;
pub mod users;

use std::sync::Arc;

use axum::{http::header, http::HeaderMap, Json, Router};
use sea_orm::DatabaseConnection;

use auth::{AuthService, ClientInfo};

/// Application state shared across handlers.
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthService,
}

/// Audit metadata pulled from the request headers. The service usually
/// sits behind a proxy, so the client address comes from X-Forwarded-For.
pub(crate) fn client_info(headers: &HeaderMap) -> ClientInfo {
    ClientInfo {
        ip_address: headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string()),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// GET /
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "MAO Culiram Abaca System API" }))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// /api/mao: the office-facing harvest, inventory, and sales surface.
pub fn mao_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/harvests", harvests::router())
        .nest("/inventory", inventory::router())
        .nest("/sales", sales::router())
}
