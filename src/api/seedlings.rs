//! /api/seedlings route handlers.
//!
//! Seedling distribution records: requested by or for a farmer, then
//! approved/released/rejected by officer action.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::seedling_distribution;
use crate::error::{Result, ServerError};

use super::extract::OfficerUser;
use super::AppState;

const STATUSES: &[&str] = &["Requested", "Approved", "Released", "Rejected"];

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_distributions).post(create_distribution))
        .route(
            "/:id",
            get(get_distribution)
                .put(update_distribution)
                .delete(delete_distribution),
        )
        .route("/:id/status", put(update_status))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedlingDistributionDto {
    pub distribution_id: String,
    pub farmer_id: String,
    pub variety: String,
    pub quantity: i32,
    pub distributed_by: Option<String>,
    pub distribution_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<seedling_distribution::Model> for SeedlingDistributionDto {
    fn from(m: seedling_distribution::Model) -> Self {
        Self {
            distribution_id: m.distribution_id,
            farmer_id: m.farmer_id,
            variety: m.variety,
            quantity: m.quantity,
            distributed_by: m.distributed_by,
            distribution_date: m.distribution_date,
            status: m.status,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn check_status(status: &str) -> Result<()> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ServerError::Validation(format!(
            "Unknown distribution status: {}",
            status
        )))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDistribution {
    pub farmer_id: String,
    pub variety: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionUpdate {
    pub variety: Option<String>,
    pub quantity: Option<i32>,
    pub distribution_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

async fn list_distributions(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<SeedlingDistributionDto>>> {
    let rows = seedling_distribution::Entity::find()
        .order_by_desc(seedling_distribution::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(
        rows.into_iter().map(SeedlingDistributionDto::from).collect(),
    ))
}

async fn create_distribution(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Json(body): Json<CreateDistribution>,
) -> Result<Json<SeedlingDistributionDto>> {
    if body.quantity <= 0 {
        return Err(ServerError::Validation(
            "Quantity must be positive".to_string(),
        ));
    }
    let now = Utc::now();
    let record = seedling_distribution::ActiveModel {
        distribution_id: Set(Uuid::new_v4().to_string()),
        farmer_id: Set(body.farmer_id),
        variety: Set(body.variety),
        quantity: Set(body.quantity),
        distributed_by: Set(None),
        distribution_date: Set(None),
        status: Set("Requested".to_string()),
        notes: Set(body.notes),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;
    Ok(Json(SeedlingDistributionDto::from(record)))
}

async fn get_distribution(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<SeedlingDistributionDto>> {
    let model = seedling_distribution::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("seedling distribution"))?;
    Ok(Json(SeedlingDistributionDto::from(model)))
}

async fn update_distribution(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<DistributionUpdate>,
) -> Result<Json<SeedlingDistributionDto>> {
    let model = seedling_distribution::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("seedling distribution"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.variety {
        active.variety = Set(v);
    }
    if let Some(v) = body.quantity {
        if v <= 0 {
            return Err(ServerError::Validation(
                "Quantity must be positive".to_string(),
            ));
        }
        active.quantity = Set(v);
    }
    if let Some(v) = body.distribution_date {
        active.distribution_date = Set(Some(v));
    }
    if let Some(v) = body.notes {
        active.notes = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(SeedlingDistributionDto::from(updated)))
}

async fn delete_distribution(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    seedling_distribution::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Distribution deleted successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Status flips record the acting officer; a release also stamps the
/// distribution date if it was never set.
async fn update_status(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<SeedlingDistributionDto>> {
    check_status(&body.status)?;

    let model = seedling_distribution::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("seedling distribution"))?;

    let now = Utc::now();
    let stamp_date = body.status == "Released" && model.distribution_date.is_none();
    let mut active = model.into_active_model();
    active.status = Set(body.status);
    active.distributed_by = Set(Some(claims.sub.clone()));
    if stamp_date {
        active.distribution_date = Set(Some(now.date_naive()));
    }
    active.updated_at = Set(now);

    let updated = active.update(&state.db).await?;
    Ok(Json(SeedlingDistributionDto::from(updated)))
}
