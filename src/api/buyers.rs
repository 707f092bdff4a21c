//! /api/buyers route handlers: the buyer's own view.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::db::entities::{buyer, sales_report};
use crate::error::{Result, ServerError};

use super::extract::AuthUser;
use super::sales::SalesReportDto;
use super::types::{BuyerDto, UserType};
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile))
        .route("/transactions", get(transactions))
}

fn require_buyer(claims: &super::auth::Claims) -> Result<()> {
    if claims.user_type != UserType::Buyer {
        return Err(ServerError::PermissionDenied);
    }
    Ok(())
}

async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<BuyerDto>> {
    require_buyer(&claims)?;
    let model = buyer::Entity::find_by_id(&claims.sub)
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound("buyer"))?;
    Ok(Json(BuyerDto::from(model)))
}

async fn transactions(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<SalesReportDto>>> {
    require_buyer(&claims)?;
    let rows = sales_report::Entity::find()
        .filter(sales_report::Column::BuyerId.eq(&claims.sub))
        .order_by_desc(sales_report::Column::SaleDate)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(SalesReportDto::from).collect()))
}
