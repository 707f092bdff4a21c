//! /api/farmers route handlers: the farmer's own view.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::db::entities::{farmer, harvest, seedling_distribution};
use crate::error::{Result, ServerError};

use super::extract::AuthUser;
use super::harvests::{insert_harvest, CreateHarvest, HarvestDto};
use super::seedlings::SeedlingDistributionDto;
use super::types::{FarmerDto, UserType};
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile))
        .route("/harvests", get(own_harvests).post(declare_harvest))
        .route("/seedlings", get(own_seedlings))
}

fn require_farmer(claims: &super::auth::Claims) -> Result<()> {
    if claims.user_type != UserType::Farmer {
        return Err(ServerError::PermissionDenied);
    }
    Ok(())
}

async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<FarmerDto>> {
    require_farmer(&claims)?;
    let model = farmer::Entity::find_by_id(&claims.sub)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("farmer"))?;
    Ok(Json(FarmerDto::from(model)))
}

async fn own_harvests(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<HarvestDto>>> {
    require_farmer(&claims)?;
    let rows = harvest::Entity::find()
        .filter(harvest::Column::FarmerId.eq(&claims.sub))
        .order_by_desc(harvest::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(HarvestDto::from).collect()))
}

/// Farmers declare their own harvests; the farmer id always comes from
/// the token, never the body.
async fn declare_harvest(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(mut body): Json<CreateHarvest>,
) -> Result<Json<HarvestDto>> {
    require_farmer(&claims)?;
    body.farmer_id = claims.sub.clone();
    let record = insert_harvest(&state.db, body).await?;
    Ok(Json(HarvestDto::from(record)))
}

async fn own_seedlings(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<SeedlingDistributionDto>>> {
    require_farmer(&claims)?;
    let rows = seedling_distribution::Entity::find()
        .filter(seedling_distribution::Column::FarmerId.eq(&claims.sub))
        .order_by_desc(seedling_distribution::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(
        rows.into_iter().map(SeedlingDistributionDto::from).collect(),
    ))
}
