//! Refresh token entity.
//!
//! Tokens are stored as SHA-256 hex digests; the raw JWT is only ever
//! returned to the client. Rows are keyed by (user_id, user_type) for
//! rotation: the latest non-revoked row wins, there is no per-device
//! session tracking.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token_id: String,
    pub user_id: String,
    /// farmer | buyer | officer
    pub user_type: String,
    /// SHA-256 hash of the refresh token (raw token never stored).
    pub token_hash: String,
    pub expires_at: DateTimeUtc,
    /// Revoked rows must never yield a new token pair.
    pub revoked: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
