//! Farmer account entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "farmers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub farmer_id: String,
    pub full_name: String,
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
    pub email: String,
    /// bcrypt hash; never leaves the database layer.
    pub password_hash: String,
    /// Base64 or URL.
    pub profile_photo: Option<String>,
    pub valid_id_photo: Option<String>,
    pub remarks: Option<String>,
    /// pending | verified | rejected
    pub verification_status: String,
    /// Officer id of the last verify/reject action.
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
    #[sea_orm(has_many = "super::harvest::Entity")]
    Harvests,
    #[sea_orm(has_many = "super::seedling_distribution::Entity")]
    SeedlingDistributions,
}

impl Related<super::harvest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Harvests.def()
    }
}

impl Related<super::seedling_distribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeedlingDistributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
