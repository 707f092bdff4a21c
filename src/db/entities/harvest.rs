//! Harvest declaration entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "harvests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub harvest_id: String,
    pub farmer_id: String,
    pub harvest_date: Date,
    pub volume_kg: f64,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
    /// Pending Verification | Verified | Rejected | In Inventory
    pub status: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTimeUtc>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::farmer::Entity",
        from = "Column::FarmerId",
        to = "super::farmer::Column::FarmerId"
    )]
    Farmer,
}

impl Related<super::farmer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farmer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
