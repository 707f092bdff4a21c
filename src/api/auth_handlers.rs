//! /api/auth route handlers: registration, login, refresh, logout.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};

use crate::error::Result;

use super::extract::AuthUser;
use super::types::{
    AuthTokens, BuyerDto, BuyerRegistration, FarmerDto, FarmerRegistration, LoginRequest,
    LoginResponse, OfficerDto, OfficerRegistration, RefreshRequest,
};
use super::{client_info, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register/farmer", post(register_farmer))
        .route("/register/buyer", post(register_buyer))
        .route("/register/officer", post(register_officer))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

async fn register_farmer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FarmerRegistration>,
) -> Result<Json<FarmerDto>> {
    let client = client_info(&headers);
    Ok(Json(state.auth.register_farmer(body, &client).await?))
}

async fn register_buyer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BuyerRegistration>,
) -> Result<Json<BuyerDto>> {
    let client = client_info(&headers);
    Ok(Json(state.auth.register_buyer(body, &client).await?))
}

async fn register_officer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<OfficerRegistration>,
) -> Result<Json<OfficerDto>> {
    let client = client_info(&headers);
    Ok(Json(state.auth.register_officer(body, &client).await?))
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let client = client_info(&headers);
    Ok(Json(state.auth.login(body, &client).await?))
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthTokens>> {
    Ok(Json(state.auth.refresh(&body.refresh_token).await?))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>> {
    let client = client_info(&headers);
    state
        .auth
        .logout(&claims.sub, claims.user_type, &client)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Logged out successfully" })))
}
