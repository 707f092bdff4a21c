//! /api/users route handlers: officer-side management of farmer, buyer,
//! and officer records, including the verify/reject workflow.
//!
//! Verification is a direct field update. There is no transition table:
//! a record can be re-verified after rejection (and vice versa), and the
//! latest action overwrites the verifier metadata.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use crate::db::entities::{buyer, farmer, officer};
use crate::error::{Result, ServerError};

use super::extract::OfficerUser;
use super::types::{BuyerDto, FarmerDto, OfficerDto, UserSummary};
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/farmers", get(list_farmers))
        .route(
            "/farmers/:id",
            get(get_farmer).put(update_farmer).delete(delete_farmer),
        )
        .route("/farmers/:id/verify", put(verify_farmer))
        .route("/farmers/:id/reject", put(reject_farmer))
        .route("/buyers", get(list_buyers))
        .route(
            "/buyers/:id",
            get(get_buyer).put(update_buyer).delete(delete_buyer),
        )
        .route("/buyers/:id/verify", put(verify_buyer))
        .route("/buyers/:id/reject", put(reject_buyer))
        .route("/officers", get(list_officers))
        .route(
            "/officers/:id",
            get(get_officer).put(update_officer).delete(delete_officer),
        )
        .route("/officers/:id/verify", put(verify_officer))
        .route("/officers/:id/reject", put(reject_officer))
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// The rejection reason must be present and non-blank before anything
/// is written.
fn required_reason(reason: Option<&str>) -> Result<&str> {
    match reason {
        Some(r) if !r.trim().is_empty() => Ok(r),
        _ => Err(ServerError::Validation(
            "Rejection reason is required".to_string(),
        )),
    }
}

// ============================================================================
// Verification core
// ============================================================================

/// `rejection: None` verifies, `Some(reason)` rejects. Farmers and
/// buyers also have `is_active` flipped; officers keep theirs.
pub(crate) async fn set_farmer_verification(
    db: &DatabaseConnection,
    id: &str,
    officer_id: &str,
    rejection: Option<&str>,
) -> Result<farmer::Model> {
    if let Some(reason) = rejection {
        required_reason(Some(reason))?;
    }

    let model = farmer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound("farmer"))?;

    let now = Utc::now();
    let mut active = model.into_active_model();
    match rejection {
        None => {
            active.is_verified = Set(true);
            active.is_active = Set(true);
            active.verification_status = Set("verified".to_string());
            active.rejection_reason = Set(None);
        }
        Some(reason) => {
            active.is_verified = Set(false);
            active.is_active = Set(false);
            active.verification_status = Set("rejected".to_string());
            active.rejection_reason = Set(Some(reason.to_string()));
        }
    }
    active.verified_by = Set(Some(officer_id.to_string()));
    active.verified_at = Set(Some(now));
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

pub(crate) async fn set_buyer_verification(
    db: &DatabaseConnection,
    id: &str,
    officer_id: &str,
    rejection: Option<&str>,
) -> Result<buyer::Model> {
    if let Some(reason) = rejection {
        required_reason(Some(reason))?;
    }

    let model = buyer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound("buyer"))?;

    let now = Utc::now();
    let mut active = model.into_active_model();
    match rejection {
        None => {
            active.is_verified = Set(true);
            active.is_active = Set(true);
            active.verification_status = Set("verified".to_string());
            active.rejection_reason = Set(None);
        }
        Some(reason) => {
            active.is_verified = Set(false);
            active.is_active = Set(false);
            active.verification_status = Set("rejected".to_string());
            active.rejection_reason = Set(Some(reason.to_string()));
        }
    }
    active.verified_by = Set(Some(officer_id.to_string()));
    active.verified_at = Set(Some(now));
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

pub(crate) async fn set_officer_verification(
    db: &DatabaseConnection,
    id: &str,
    verifier_id: &str,
    rejection: Option<&str>,
) -> Result<officer::Model> {
    if let Some(reason) = rejection {
        required_reason(Some(reason))?;
    }

    let model = officer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound("officer"))?;

    let now = Utc::now();
    let mut active = model.into_active_model();
    match rejection {
        None => {
            active.is_verified = Set(true);
            active.verification_status = Set("verified".to_string());
            active.rejection_reason = Set(None);
        }
        Some(reason) => {
            active.is_verified = Set(false);
            active.verification_status = Set("rejected".to_string());
            active.rejection_reason = Set(Some(reason.to_string()));
        }
    }
    active.verified_by = Set(Some(verifier_id.to_string()));
    active.verified_at = Set(Some(now));
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

// ============================================================================
// Farmers
// ============================================================================

async fn list_farmers(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<UserSummary>>> {
    let rows = farmer::Entity::find()
        .order_by_desc(farmer::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(UserSummary::from).collect()))
}

async fn get_farmer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<FarmerDto>> {
    let model = farmer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("farmer"))?;
    Ok(Json(FarmerDto::from(model)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerUpdate {
    pub full_name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub association_name: Option<String>,
    pub farm_location: Option<String>,
    pub farm_coordinates: Option<String>,
    pub farm_area_hectares: Option<f64>,
    pub years_in_farming: Option<i32>,
    pub type_of_abaca_planted: Option<String>,
    pub average_harvest_volume_kg: Option<f64>,
    pub harvest_frequency_weeks: Option<i32>,
    pub selling_price_range_min: Option<f64>,
    pub selling_price_range_max: Option<f64>,
    pub regular_buyer: Option<String>,
    pub income_per_cycle: Option<f64>,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub remarks: Option<String>,
}

async fn update_farmer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<FarmerUpdate>,
) -> Result<Json<serde_json::Value>> {
    let model = farmer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("farmer"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.full_name {
        active.full_name = Set(v);
    }
    if let Some(v) = body.sex {
        active.sex = Set(Some(v));
    }
    if let Some(v) = body.age {
        active.age = Set(Some(v));
    }
    if let Some(v) = body.contact_number {
        active.contact_number = Set(Some(v));
    }
    if let Some(v) = body.address {
        active.address = Set(Some(v));
    }
    if let Some(v) = body.barangay {
        active.barangay = Set(Some(v));
    }
    if let Some(v) = body.municipality {
        active.municipality = Set(Some(v));
    }
    if let Some(v) = body.association_name {
        active.association_name = Set(Some(v));
    }
    if let Some(v) = body.farm_location {
        active.farm_location = Set(Some(v));
    }
    if let Some(v) = body.farm_coordinates {
        active.farm_coordinates = Set(Some(v));
    }
    if let Some(v) = body.farm_area_hectares {
        active.farm_area_hectares = Set(Some(v));
    }
    if let Some(v) = body.years_in_farming {
        active.years_in_farming = Set(Some(v));
    }
    if let Some(v) = body.type_of_abaca_planted {
        active.type_of_abaca_planted = Set(Some(v));
    }
    if let Some(v) = body.average_harvest_volume_kg {
        active.average_harvest_volume_kg = Set(Some(v));
    }
    if let Some(v) = body.harvest_frequency_weeks {
        active.harvest_frequency_weeks = Set(Some(v));
    }
    if let Some(v) = body.selling_price_range_min {
        active.selling_price_range_min = Set(Some(v));
    }
    if let Some(v) = body.selling_price_range_max {
        active.selling_price_range_max = Set(Some(v));
    }
    if let Some(v) = body.regular_buyer {
        active.regular_buyer = Set(Some(v));
    }
    if let Some(v) = body.income_per_cycle {
        active.income_per_cycle = Set(Some(v));
    }
    if let Some(v) = body.profile_photo {
        active.profile_photo = Set(Some(v));
    }
    if let Some(v) = body.valid_id_photo {
        active.valid_id_photo = Set(Some(v));
    }
    if let Some(v) = body.remarks {
        active.remarks = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(serde_json::json!({
        "message": "Farmer updated successfully",
        "farmer": FarmerDto::from(updated),
    })))
}

async fn delete_farmer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    farmer::Entity::delete_by_id(&id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Farmer deleted successfully" })))
}

async fn verify_farmer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let updated = set_farmer_verification(&state.db, &id, &claims.sub, None).await?;
    Ok(Json(serde_json::json!({
        "message": "Farmer verified successfully. They can now login to the system.",
        "farmer": FarmerDto::from(updated),
    })))
}

async fn reject_farmer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<serde_json::Value>> {
    let reason = required_reason(body.reason.as_deref())?;
    let updated = set_farmer_verification(&state.db, &id, &claims.sub, Some(reason)).await?;
    Ok(Json(serde_json::json!({
        "message": "Farmer application rejected. They will be notified of the reason.",
        "farmer": FarmerDto::from(updated),
    })))
}

// ============================================================================
// Buyers
// ============================================================================

async fn list_buyers(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<UserSummary>>> {
    let rows = buyer::Entity::find()
        .order_by_desc(buyer::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(UserSummary::from).collect()))
}

async fn get_buyer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<BuyerDto>> {
    let model = buyer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("buyer"))?;
    Ok(Json(BuyerDto::from(model)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerUpdate {
    pub business_name: Option<String>,
    pub owner_name: Option<String>,
    pub business_address: Option<String>,
    pub contact_number: Option<String>,
    pub license_or_accreditation: Option<String>,
    pub buying_schedule: Option<String>,
    pub buying_location: Option<String>,
    pub warehouse_address: Option<String>,
    pub accepted_quality_grades: Option<Vec<String>>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub payment_terms: Option<String>,
    pub partnered_associations: Option<Vec<String>>,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub business_permit_photo: Option<String>,
    pub remarks: Option<String>,
}

async fn update_buyer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<BuyerUpdate>,
) -> Result<Json<serde_json::Value>> {
    let model = buyer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("buyer"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.business_name {
        active.business_name = Set(v);
    }
    if let Some(v) = body.owner_name {
        active.owner_name = Set(v);
    }
    if let Some(v) = body.business_address {
        active.business_address = Set(Some(v));
    }
    if let Some(v) = body.contact_number {
        active.contact_number = Set(Some(v));
    }
    if let Some(v) = body.license_or_accreditation {
        active.license_or_accreditation = Set(Some(v));
    }
    if let Some(v) = body.buying_schedule {
        active.buying_schedule = Set(Some(v));
    }
    if let Some(v) = body.buying_location {
        active.buying_location = Set(Some(v));
    }
    if let Some(v) = body.warehouse_address {
        active.warehouse_address = Set(Some(v));
    }
    if let Some(v) = body.accepted_quality_grades {
        active.accepted_quality_grades = Set(Some(serde_json::json!(v)));
    }
    if let Some(v) = body.price_range_min {
        active.price_range_min = Set(Some(v));
    }
    if let Some(v) = body.price_range_max {
        active.price_range_max = Set(Some(v));
    }
    if let Some(v) = body.payment_terms {
        active.payment_terms = Set(Some(v));
    }
    if let Some(v) = body.partnered_associations {
        active.partnered_associations = Set(Some(serde_json::json!(v)));
    }
    if let Some(v) = body.profile_photo {
        active.profile_photo = Set(Some(v));
    }
    if let Some(v) = body.valid_id_photo {
        active.valid_id_photo = Set(Some(v));
    }
    if let Some(v) = body.business_permit_photo {
        active.business_permit_photo = Set(Some(v));
    }
    if let Some(v) = body.remarks {
        active.remarks = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(serde_json::json!({
        "message": "Buyer updated successfully",
        "buyer": BuyerDto::from(updated),
    })))
}

async fn delete_buyer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    buyer::Entity::delete_by_id(&id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Buyer deleted successfully" })))
}

async fn verify_buyer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let updated = set_buyer_verification(&state.db, &id, &claims.sub, None).await?;
    Ok(Json(serde_json::json!({
        "message": "Buyer verified successfully. They can now login to the system.",
        "buyer": BuyerDto::from(updated),
    })))
}

async fn reject_buyer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<serde_json::Value>> {
    let reason = required_reason(body.reason.as_deref())?;
    let updated = set_buyer_verification(&state.db, &id, &claims.sub, Some(reason)).await?;
    Ok(Json(serde_json::json!({
        "message": "Buyer application rejected. They will be notified of the reason.",
        "buyer": BuyerDto::from(updated),
    })))
}

// ============================================================================
// Officers (self-registered officers only)
// ============================================================================

async fn list_officers(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<UserSummary>>> {
    let rows = officer::Entity::find()
        .filter(officer::Column::ProfileCompleted.eq(true))
        .order_by_desc(officer::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(UserSummary::from).collect()))
}

async fn get_officer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<OfficerDto>> {
    let model = officer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("officer"))?;
    Ok(Json(OfficerDto::from(model)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerUpdate {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub association_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub term_start_date: Option<String>,
    pub term_end_date: Option<String>,
    pub term_duration: Option<String>,
    pub farmers_under_supervision: Option<i32>,
    pub profile_picture: Option<String>,
    pub valid_id_photo: Option<String>,
    pub profile_completed: Option<bool>,
    pub remarks: Option<String>,
}

async fn update_officer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<OfficerUpdate>,
) -> Result<Json<OfficerDto>> {
    let model = officer::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("officer"))?;

    let mut active = model.into_active_model();
    if let Some(v) = body.full_name {
        active.full_name = Set(v);
    }
    if let Some(v) = body.position {
        active.position = Set(Some(v));
    }
    if let Some(v) = body.association_name {
        active.association_name = Set(Some(v));
    }
    if let Some(v) = body.contact_number {
        active.contact_number = Set(Some(v));
    }
    if let Some(v) = body.address {
        active.address = Set(Some(v));
    }
    if let Some(v) = body.term_start_date {
        active.term_start_date = Set(Some(v));
    }
    if let Some(v) = body.term_end_date {
        active.term_end_date = Set(Some(v));
    }
    if let Some(v) = body.term_duration {
        active.term_duration = Set(Some(v));
    }
    if let Some(v) = body.farmers_under_supervision {
        active.farmers_under_supervision = Set(Some(v));
    }
    if let Some(v) = body.profile_picture {
        active.profile_picture = Set(Some(v));
    }
    if let Some(v) = body.valid_id_photo {
        active.valid_id_photo = Set(Some(v));
    }
    if let Some(v) = body.profile_completed {
        active.profile_completed = Set(v);
    }
    if let Some(v) = body.remarks {
        active.remarks = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(OfficerDto::from(updated)))
}

async fn delete_officer(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    officer::Entity::delete_by_id(&id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Officer deleted successfully" })))
}

async fn verify_officer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let updated = set_officer_verification(&state.db, &id, &claims.sub, None).await?;
    Ok(Json(serde_json::json!({
        "message": "Officer verified successfully",
        "data": OfficerDto::from(updated),
    })))
}

async fn reject_officer(
    State(state): State<Arc<AppState>>,
    OfficerUser(claims): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<serde_json::Value>> {
    let reason = required_reason(body.reason.as_deref())?;
    let updated = set_officer_verification(&state.db, &id, &claims.sub, Some(reason)).await?;
    Ok(Json(serde_json::json!({
        "message": "Officer rejected successfully",
        "data": OfficerDto::from(updated),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use uuid::Uuid;

    async fn test_db() -> DatabaseConnection {
        db::init_database("sqlite::memory:")
            .await
            .expect("in-memory database")
    }

    async fn insert_farmer(db: &DatabaseConnection) -> farmer::Model {
        let now = Utc::now();
        farmer::ActiveModel {
            farmer_id: Set(Uuid::new_v4().to_string()),
            full_name: Set("Test Farmer".to_string()),
            sex: Set(None),
            age: Set(None),
            contact_number: Set(None),
            address: Set(None),
            barangay: Set(None),
            municipality: Set(None),
            association_name: Set(None),
            farm_location: Set(None),
            farm_coordinates: Set(None),
            farm_area_hectares: Set(None),
            years_in_farming: Set(None),
            type_of_abaca_planted: Set(None),
            average_harvest_volume_kg: Set(None),
            harvest_frequency_weeks: Set(None),
            selling_price_range_min: Set(None),
            selling_price_range_max: Set(None),
            regular_buyer: Set(None),
            income_per_cycle: Set(None),
            email: Set("farmer@example.com".to_string()),
            password_hash: Set("hash".to_string()),
            profile_photo: Set(None),
            valid_id_photo: Set(None),
            remarks: Set(None),
            verification_status: Set("pending".to_string()),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            is_active: Set(true),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn verify_then_reject_overwrites_metadata() {
        let db = test_db().await;
        let record = insert_farmer(&db).await;

        let verified =
            set_farmer_verification(&db, &record.farmer_id, "officer-1", None)
                .await
                .unwrap();
        assert!(verified.is_verified);
        assert!(verified.is_active);
        assert_eq!(verified.verification_status, "verified");
        assert_eq!(verified.verified_by.as_deref(), Some("officer-1"));
        assert!(verified.verified_at.is_some());
        assert!(verified.rejection_reason.is_none());

        // Rejecting afterwards is allowed and replaces the metadata.
        let rejected = set_farmer_verification(
            &db,
            &record.farmer_id,
            "officer-2",
            Some("Photo does not match ID"),
        )
        .await
        .unwrap();
        assert!(!rejected.is_verified);
        assert!(!rejected.is_active);
        assert_eq!(rejected.verification_status, "rejected");
        assert_eq!(rejected.verified_by.as_deref(), Some("officer-2"));
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Photo does not match ID")
        );

        // And back again: the reason is cleared.
        let re_verified =
            set_farmer_verification(&db, &record.farmer_id, "officer-3", None)
                .await
                .unwrap();
        assert!(re_verified.is_verified);
        assert_eq!(re_verified.verified_by.as_deref(), Some("officer-3"));
        assert!(re_verified.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn blank_rejection_reason_fails_before_any_write() {
        let db = test_db().await;
        let record = insert_farmer(&db).await;

        for reason in ["", "   ", "\t\n"] {
            let err = set_farmer_verification(&db, &record.farmer_id, "officer-1", Some(reason))
                .await
                .unwrap_err();
            assert!(matches!(err, ServerError::Validation(_)), "reason {:?}", reason);
        }

        // Row untouched.
        let unchanged = farmer::Entity::find_by_id(&record.farmer_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.verification_status, "pending");
        assert!(unchanged.verified_by.is_none());
        assert!(unchanged.verified_at.is_none());
    }

    #[tokio::test]
    async fn officer_verification_keeps_active_flag() {
        let db = test_db().await;
        let now = Utc::now();
        let record = officer::ActiveModel {
            officer_id: Set(Uuid::new_v4().to_string()),
            full_name: Set("Self Registered".to_string()),
            email: Set("self@example.com".to_string()),
            password_hash: Set("hash".to_string()),
            position: Set(Some("Secretary".to_string())),
            association_name: Set(Some("Upland Growers".to_string())),
            contact_number: Set(None),
            address: Set(None),
            term_start_date: Set(None),
            term_end_date: Set(None),
            term_duration: Set(None),
            farmers_under_supervision: Set(None),
            profile_picture: Set(None),
            valid_id_photo: Set(None),
            remarks: Set(None),
            is_super_admin: Set(false),
            profile_completed: Set(true),
            verification_status: Set("pending".to_string()),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            is_active: Set(true),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        }
        .insert(&db)
        .await
        .unwrap();

        let rejected = set_officer_verification(
            &db,
            &record.officer_id,
            "admin-1",
            Some("Association not accredited"),
        )
        .await
        .unwrap();
        assert!(!rejected.is_verified);
        // Officers are not deactivated on rejection.
        assert!(rejected.is_active);
        assert_eq!(rejected.verification_status, "rejected");
    }
}
