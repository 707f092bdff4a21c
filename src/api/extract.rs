//! Request authentication extractors.
//!
//! `AuthUser` pulls and verifies the Bearer JWT; `OfficerUser` and
//! `SuperAdmin` add the role gates used by the management routes.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::{Result, ServerError};

use super::auth::Claims;
use super::types::UserType;
use super::AppState;

/// Any authenticated account.
pub struct AuthUser(pub Claims);

/// An authenticated association officer.
pub struct OfficerUser(pub Claims);

/// An authenticated officer with the super-admin flag.
pub struct SuperAdmin(pub Claims);

fn bearer_claims(parts: &Parts, state: &AppState) -> Result<Claims> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(ServerError::AuthRequired)?;
    let value = header.to_str().map_err(|_| ServerError::AuthRequired)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ServerError::AuthRequired)?;
    state.auth.verify_token(token)
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self> {
        bearer_claims(parts, state).map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OfficerUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self> {
        let claims = bearer_claims(parts, state)?;
        if claims.user_type != UserType::Officer {
            return Err(ServerError::PermissionDenied);
        }
        Ok(OfficerUser(claims))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SuperAdmin {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self> {
        let claims = bearer_claims(parts, state)?;
        if claims.user_type != UserType::Officer || claims.is_super_admin != Some(true) {
            return Err(ServerError::PermissionDenied);
        }
        Ok(SuperAdmin(claims))
    }
}
