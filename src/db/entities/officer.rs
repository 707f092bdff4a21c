//! Association officer entity.
//!
//! Admin-created officers start with only the basic identity fields;
//! `profile_completed` flips once the profile form is filled in.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "association_officers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub officer_id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
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
    pub remarks: Option<String>,
    /// Grants the maintenance, officer-management, and content pages.
    pub is_super_admin: bool,
    pub profile_completed: bool,
    pub verification_status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTimeUtc>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub last_login: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
