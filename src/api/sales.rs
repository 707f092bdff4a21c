//! /api/mao/sales route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::sales_report;
use crate::error::{Result, ServerError};

use super::extract::OfficerUser;
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route(
            "/:id",
            get(get_report).put(update_report).delete(delete_report),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportDto {
    pub report_id: String,
    pub buyer_id: Option<String>,
    pub farmer_id: Option<String>,
    pub sale_date: NaiveDate,
    pub volume_kg: f64,
    pub price_per_kg: f64,
    pub total_amount: f64,
    pub payment_terms: Option<String>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<sales_report::Model> for SalesReportDto {
    fn from(m: sales_report::Model) -> Self {
        Self {
            report_id: m.report_id,
            buyer_id: m.buyer_id,
            farmer_id: m.farmer_id,
            sale_date: m.sale_date,
            volume_kg: m.volume_kg,
            price_per_kg: m.price_per_kg,
            total_amount: m.total_amount,
            payment_terms: m.payment_terms,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesReport {
    pub buyer_id: Option<String>,
    pub farmer_id: Option<String>,
    pub sale_date: NaiveDate,
    pub volume_kg: f64,
    pub price_per_kg: f64,
    /// Computed from volume and price when absent.
    pub total_amount: Option<f64>,
    pub payment_terms: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportUpdate {
    pub sale_date: Option<NaiveDate>,
    pub volume_kg: Option<f64>,
    pub price_per_kg: Option<f64>,
    pub total_amount: Option<f64>,
    pub payment_terms: Option<String>,
    pub notes: Option<String>,
}

async fn list_reports(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
) -> Result<Json<Vec<SalesReportDto>>> {
    let rows = sales_report::Entity::find()
        .order_by_desc(sales_report::Column::SaleDate)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(SalesReportDto::from).collect()))
}

async fn create_report(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Json(body): Json<CreateSalesReport>,
) -> Result<Json<SalesReportDto>> {
    if body.volume_kg <= 0.0 || body.price_per_kg < 0.0 {
        return Err(ServerError::Validation(
            "Volume must be positive and price non-negative".to_string(),
        ));
    }
    let now = Utc::now();
    let total = body
        .total_amount
        .unwrap_or(body.volume_kg * body.price_per_kg);
    let record = sales_report::ActiveModel {
        report_id: Set(Uuid::new_v4().to_string()),
        buyer_id: Set(body.buyer_id),
        farmer_id: Set(body.farmer_id),
        sale_date: Set(body.sale_date),
        volume_kg: Set(body.volume_kg),
        price_per_kg: Set(body.price_per_kg),
        total_amount: Set(total),
        payment_terms: Set(body.payment_terms),
        notes: Set(body.notes),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;
    Ok(Json(SalesReportDto::from(record)))
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<SalesReportDto>> {
    let model = sales_report::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("sales report"))?;
    Ok(Json(SalesReportDto::from(model)))
}

async fn update_report(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
    Json(body): Json<SalesReportUpdate>,
) -> Result<Json<SalesReportDto>> {
    let model = sales_report::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("sales report"))?;

    // Recompute the total when volume or price changes without an
    // explicit override.
    let volume = body.volume_kg.unwrap_or(model.volume_kg);
    let price = body.price_per_kg.unwrap_or(model.price_per_kg);
    let recompute = body.total_amount.is_none()
        && (body.volume_kg.is_some() || body.price_per_kg.is_some());

    let mut active = model.into_active_model();
    if let Some(v) = body.sale_date {
        active.sale_date = Set(v);
    }
    if let Some(v) = body.volume_kg {
        active.volume_kg = Set(v);
    }
    if let Some(v) = body.price_per_kg {
        active.price_per_kg = Set(v);
    }
    if let Some(v) = body.total_amount {
        active.total_amount = Set(v);
    } else if recompute {
        active.total_amount = Set(volume * price);
    }
    if let Some(v) = body.payment_terms {
        active.payment_terms = Set(Some(v));
    }
    if let Some(v) = body.notes {
        active.notes = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(SalesReportDto::from(updated)))
}

async fn delete_report(
    State(state): State<Arc<AppState>>,
    OfficerUser(_): OfficerUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    sales_report::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Sales report deleted successfully" })))
}
