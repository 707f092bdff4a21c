//! Buyer account entity.
//!
//! `accepted_quality_grades` and `partnered_associations` are stored as
//! JSON arrays in text columns, matching the managed schema.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "buyers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub buyer_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub business_address: Option<String>,
    pub contact_number: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub license_or_accreditation: Option<String>,
    pub buying_schedule: Option<String>,
    pub buying_location: Option<String>,
    pub warehouse_address: Option<String>,
    pub accepted_quality_grades: Option<Json>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub payment_terms: Option<String>,
    pub partnered_associations: Option<Json>,
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub business_permit_photo: Option<String>,
    pub remarks: Option<String>,
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
pub enum Relation {
    #[sea_orm(has_many = "super::sales_report::Entity")]
    SalesReports,
}

impl Related<super::sales_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
