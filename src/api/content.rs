//! /api/articles, /api/team, /api/maintenance, and /api/admin handlers.
//!
//! Public content reads, super-admin content writes, the maintenance
//! flag, and the authenticated health report.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::{article, system_setting, team_member};
use crate::error::{Result, ServerError};

use super::extract::{OfficerUser, SuperAdmin};
use super::AppState;

// ============================================================================
// Articles
// ============================================================================

pub fn articles_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route(
            "/:id",
            get(get_article).put(update_article).delete(delete_article),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub article_id: String,
    pub title: String,
    pub content: String,
    pub cover_photo: Option<String>,
    pub author_id: String,
    pub published: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<article::Model> for ArticleDto {
    fn from(m: article::Model) -> Self {
        Self {
            article_id: m.article_id,
            title: m.title,
            content: m.content,
            cover_photo: m.cover_photo,
            author_id: m.author_id,
            published: m.published,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_photo: Option<String>,
    pub published: Option<bool>,
}

/// Public list: published articles only, newest first.
async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArticleDto>>> {
    let rows = article::Entity::find()
        .filter(article::Column::Published.eq(true))
        .order_by_desc(article::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(ArticleDto::from).collect()))
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleDto>> {
    let model = article::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .filter(|a| a.published)
        .ok_or(ServerError::NotFound("article"))?;
    Ok(Json(ArticleDto::from(model)))
}

async fn create_article(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Json(body): Json<CreateArticle>,
) -> Result<Json<ArticleDto>> {
    if body.title.trim().is_empty() {
        return Err(ServerError::Validation("Title is required".to_string()));
    }
    let now = Utc::now();
    let record = article::ActiveModel {
        article_id: Set(Uuid::new_v4().to_string()),
        title: Set(body.title),
        content: Set(body.content),
        cover_photo: Set(body.cover_photo),
        author_id: Set(claims.sub),
        published: Set(body.published),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;
    Ok(Json(ArticleDto::from(record)))
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<ArticleUpdate>,
) -> Result<Json<ArticleDto>> {
    let model = article::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("article"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.title {
        active.title = Set(v);
    }
    if let Some(v) = body.content {
        active.content = Set(v);
    }
    if let Some(v) = body.cover_photo {
        active.cover_photo = Set(Some(v));
    }
    if let Some(v) = body.published {
        active.published = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(ArticleDto::from(updated)))
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    article::Entity::delete_by_id(&id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Article deleted successfully" })))
}

// ============================================================================
// Team
// ============================================================================

pub fn team_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_team).post(create_member))
        .route("/:id", get(get_member).put(update_member).delete(delete_member))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub member_id: String,
    pub full_name: String,
    pub role: String,
    pub photo: Option<String>,
    pub display_order: i32,
}

impl From<team_member::Model> for TeamMemberDto {
    fn from(m: team_member::Model) -> Self {
        Self {
            member_id: m.member_id,
            full_name: m.full_name,
            role: m.role,
            photo: m.photo,
            display_order: m.display_order,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMember {
    pub full_name: String,
    pub role: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub display_order: Option<i32>,
}

async fn list_team(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamMemberDto>>> {
    let rows = team_member::Entity::find()
        .order_by_asc(team_member::Column::DisplayOrder)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(TeamMemberDto::from).collect()))
}

async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamMemberDto>> {
    let model = team_member::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("team member"))?;
    Ok(Json(TeamMemberDto::from(model)))
}

async fn create_member(
    State(state): State<Arc<AppState>>,
    SuperAdmin(_): SuperAdmin,
    Json(body): Json<CreateTeamMember>,
) -> Result<Json<TeamMemberDto>> {
    let now = Utc::now();
    let record = team_member::ActiveModel {
        member_id: Set(Uuid::new_v4().to_string()),
        full_name: Set(body.full_name),
        role: Set(body.role),
        photo: Set(body.photo),
        display_order: Set(body.display_order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;
    Ok(Json(TeamMemberDto::from(record)))
}

async fn update_member(
    State(state): State<Arc<AppState>>,
    SuperAdmin(_): SuperAdmin,
    Path(id): Path<String>,
    Json(body): Json<TeamMemberUpdate>,
) -> Result<Json<TeamMemberDto>> {
    let model = team_member::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("team member"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.full_name {
        active.full_name = Set(v);
    }
    if let Some(v) = body.role {
        active.role = Set(v);
    }
    if let Some(v) = body.photo {
        active.photo = Set(Some(v));
    }
    if let Some(v) = body.display_order {
        active.display_order = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(TeamMemberDto::from(updated)))
}

async fn delete_member(
    State(state): State<Arc<AppState>>,
    SuperAdmin(_): SuperAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    team_member::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Team member deleted successfully" })))
}

// ============================================================================
// Maintenance mode
// ============================================================================

pub fn maintenance_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(maintenance_status))
        .route("/", put(set_maintenance))
}

async fn maintenance_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>> {
    let enabled = state.auth.maintenance_enabled().await?;
    Ok(Json(serde_json::json!({ "maintenanceMode": enabled })))
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    pub enabled: bool,
}

async fn set_maintenance(
    State(state): State<Arc<AppState>>,
    SuperAdmin(_): SuperAdmin,
    Json(body): Json<MaintenanceRequest>,
) -> Result<Json<serde_json::Value>> {
    let value = if body.enabled { "true" } else { "false" };
    let now = Utc::now();

    let existing = system_setting::Entity::find_by_id(system_setting::MAINTENANCE_MODE)
        .one(&state.db)
        .await?;
    match existing {
        Some(model) => {
            let mut active = model.into_active_model();
            active.value = Set(value.to_string());
            active.updated_at = Set(now);
            active.update(&state.db).await?;
        }
        None => {
            system_setting::ActiveModel {
                key: Set(system_setting::MAINTENANCE_MODE.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            }
            .insert(&state.db)
            .await?;
        }
    }

    Ok(Json(serde_json::json!({ "maintenanceMode": body.enabled })))
}

// ============================================================================
// Admin
// ============================================================================

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(admin_health))
}

async fn admin_health(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<serde_json::Value>> {
    state.db.ping().await?;
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
