//! /api/mao/harvests route handlers.
//!
//! Harvest declarations move Pending Verification → Verified/Rejected by
//! officer action, and a verified harvest can be pulled into inventory.
//! Transitions are direct field updates; moving into inventory issues two
//! independent statements with no surrounding transaction.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::{harvest, inventory_item};
use crate::error::{Result, ServerError};

use super::extract::OfficerUser;
use super::inventory::InventoryItemDto;
use super::users::RejectRequest;
use super::AppState;

pub const STATUS_PENDING: &str = "Pending Verification";
pub const STATUS_VERIFIED: &str = "Verified";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_IN_INVENTORY: &str = "In Inventory";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_harvests).post(create_harvest))
        .route(
            "/:id",
            get(get_harvest).put(update_harvest).delete(delete_harvest),
        )
        .route("/:id/verify", put(verify_harvest))
        .route("/:id/reject", put(reject_harvest))
        .route("/:id/move-to-inventory", post(move_to_inventory))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestDto {
    pub harvest_id: String,
    pub farmer_id: String,
    pub harvest_date: NaiveDate,
    pub volume_kg: f64,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<chrono::DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<harvest::Model> for HarvestDto {
    fn from(m: harvest::Model) -> Self {
        Self {
            harvest_id: m.harvest_id,
            farmer_id: m.farmer_id,
            harvest_date: m.harvest_date,
            volume_kg: m.volume_kg,
            quality_grade: m.quality_grade,
            notes: m.notes,
            status: m.status,
            verified_by: m.verified_by,
            verified_at: m.verified_at,
            rejection_reason: m.rejection_reason,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHarvest {
    pub farmer_id: String,
    pub harvest_date: NaiveDate,
    pub volume_kg: f64,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestUpdate {
    pub harvest_date: Option<NaiveDate>,
    pub volume_kg: Option<f64>,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
}

/// Insert a harvest declaration in its initial state. Shared with the
/// farmer-facing route.
pub(crate) async fn insert_harvest(
    db: &DatabaseConnection,
    data: CreateHarvest,
) -> Result<harvest::Model> {
    if data.volume_kg <= 0.0 {
        return Err(ServerError::Validation(
            "Harvest volume must be positive".to_string(),
        ));
    }
    let now = Utc::now();
    Ok(harvest::ActiveModel {
        harvest_id: Set(Uuid::new_v4().to_string()),
        farmer_id: Set(data.farmer_id),
        harvest_date: Set(data.harvest_date),
        volume_kg: Set(data.volume_kg),
        quality_grade: Set(data.quality_grade),
        notes: Set(data.notes),
        status: Set(STATUS_PENDING.to_string()),
        verified_by: Set(None),
        verified_at: Set(None),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?)
}

pub(crate) async fn set_harvest_verification(
    db: &DatabaseConnection,
    id: &str,
    officer_id: &str,
    rejection: Option<&str>,
) -> Result<harvest::Model> {
    if let Some(reason) = rejection {
        if reason.trim().is_empty() {
            return Err(ServerError::Validation(
                "Rejection reason is required".to_string(),
            ));
        }
    }

    let model = harvest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound("harvest"))?;

    let now = Utc::now();
    let mut active = model.into_active_model();
    match rejection {
        None => {
            active.status = Set(STATUS_VERIFIED.to_string());
            active.rejection_reason = Set(None);
        }
        Some(reason) => {
            active.status = Set(STATUS_REJECTED.to_string());
            active.rejection_reason = Set(Some(reason.to_string()));
        }
    }
    active.verified_by = Set(Some(officer_id.to_string()));
    active.verified_at = Set(Some(now));
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

/// Flip a verified harvest into inventory and create the stock row.
/// Two independent writes; a failure in between leaves the harvest
/// flagged without stock, which an officer resolves by hand.
pub(crate) async fn move_harvest_to_inventory(
    db: &DatabaseConnection,
    id: &str,
    storage_location: Option<String>,
) -> Result<inventory_item::Model> {
    let model = harvest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound("harvest"))?;

    if model.status != STATUS_VERIFIED {
        return Err(ServerError::Validation(
            "Only verified harvests can be moved to inventory".to_string(),
        ));
    }

    let now = Utc::now();
    let volume_kg = model.volume_kg;
    let quality_grade = model.quality_grade.clone();

    let mut active = model.into_active_model();
    active.status = Set(STATUS_IN_INVENTORY.to_string());
    active.updated_at = Set(now);
    active.update(db).await?;

    let item = inventory_item::ActiveModel {
        item_id: Set(Uuid::new_v4().to_string()),
        harvest_id: Set(Some(id.to_string())),
        quality_grade: Set(quality_grade),
        volume_kg: Set(volume_kg),
        storage_location: Set(storage_location),
        status: Set(super::inventory::STATUS_STOCKED.to_string()),
        notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(item)
}

async fn list_harvests(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<HarvestDto>>> {
    let rows = harvest::Entity::find()
        .order_by_desc(harvest::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(HarvestDto::from).collect()))
}

async fn create_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Json(body): Json<CreateHarvest>,
) -> Result<Json<HarvestDto>> {
    let record = insert_harvest(&state.db, body).await?;
    Ok(Json(HarvestDto::from(record)))
}

async fn get_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<HarvestDto>> {
    let model = harvest::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("harvest"))?;
    Ok(Json(HarvestDto::from(model)))
}

async fn update_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<HarvestUpdate>,
) -> Result<Json<HarvestDto>> {
    let model = harvest::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("harvest"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.harvest_date {
        active.harvest_date = Set(v);
    }
    if let Some(v) = body.volume_kg {
        if v <= 0.0 {
            return Err(ServerError::Validation(
                "Harvest volume must be positive".to_string(),
            ));
        }
        active.volume_kg = Set(v);
    }
    if let Some(v) = body.quality_grade {
        active.quality_grade = Set(Some(v));
    }
    if let Some(v) = body.notes {
        active.notes = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(HarvestDto::from(updated)))
}

async fn delete_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    harvest::Entity::delete_by_id(&id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Harvest deleted successfully" })))
}

async fn verify_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let updated = set_harvest_verification(&state.db, &id, &claims.sub, None).await?;
    Ok(Json(serde_json::json!({
        "message": "Harvest verified successfully",
        "harvest": HarvestDto::from(updated),
    })))
}

async fn reject_harvest(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<serde_json::Value>> {
    let reason = body.reason.as_deref().unwrap_or("");
    let updated = set_harvest_verification(&state.db, &id, &claims.sub, Some(reason)).await?;
    Ok(Json(serde_json::json!({
        "message": "Harvest rejected",
        "harvest": HarvestDto::from(updated),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToInventoryRequest {
    pub storage_location: Option<String>,
}

async fn move_to_inventory(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<MoveToInventoryRequest>,
) -> Result<Json<serde_json::Value>> {
    let item = move_harvest_to_inventory(&state.db, &id, body.storage_location).await?;
    Ok(Json(serde_json::json!({
        "message": "Harvest moved to inventory",
        "item": InventoryItemDto::from(item),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_db() -> DatabaseConnection {
        db::init_database("sqlite::memory:")
            .await
            .expect("in-memory database")
    }

    fn sample_harvest(farmer_id: &str) -> CreateHarvest {
        CreateHarvest {
            farmer_id: farmer_id.to_string(),
            harvest_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            volume_kg: 120.5,
            quality_grade: Some("S2".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn harvest_starts_pending_and_verifies() {
        let db = test_db().await;
        let record = insert_harvest(&db, sample_harvest("farmer-1")).await.unwrap();
        assert_eq!(record.status, STATUS_PENDING);

        let verified = set_harvest_verification(&db, &record.harvest_id, "officer-1", None)
            .await
            .unwrap();
        assert_eq!(verified.status, STATUS_VERIFIED);
        assert_eq!(verified.verified_by.as_deref(), Some("officer-1"));
    }

    #[tokio::test]
    async fn reject_requires_reason() {
        let db = test_db().await;
        let record = insert_harvest(&db, sample_harvest("farmer-1")).await.unwrap();

        let err = set_harvest_verification(&db, &record.harvest_id, "officer-1", Some("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));

        let ok = set_harvest_verification(
            &db,
            &record.harvest_id,
            "officer-1",
            Some("Volume implausible for the declared area"),
        )
        .await
        .unwrap();
        assert_eq!(ok.status, STATUS_REJECTED);
    }

    #[tokio::test]
    async fn move_to_inventory_requires_verified_and_creates_stock() {
        let db = test_db().await;
        let record = insert_harvest(&db, sample_harvest("farmer-1")).await.unwrap();

        // Still pending: refused.
        let err = move_harvest_to_inventory(&db, &record.harvest_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));

        set_harvest_verification(&db, &record.harvest_id, "officer-1", None)
            .await
            .unwrap();
        let item =
            move_harvest_to_inventory(&db, &record.harvest_id, Some("Warehouse A".to_string()))
                .await
                .unwrap();

        assert_eq!(item.harvest_id.as_deref(), Some(record.harvest_id.as_str()));
        assert_eq!(item.volume_kg, 120.5);
        assert_eq!(item.status, super::super::inventory::STATUS_STOCKED);

        let harvest_after = harvest::Entity::find_by_id(&record.harvest_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(harvest_after.status, STATUS_IN_INVENTORY);
    }

    #[tokio::test]
    async fn nonpositive_volume_rejected() {
        let db = test_db().await;
        let mut data = sample_harvest("farmer-1");
        data.volume_kg = 0.0;
        let err = insert_harvest(&db, data).await.unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));
    }
}
