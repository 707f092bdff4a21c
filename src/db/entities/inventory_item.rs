//! Inventory stock entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: String,
    /// Set when the stock came from a verified harvest.
    pub harvest_id: Option<String>,
    pub quality_grade: Option<String>,
    pub volume_kg: f64,
    pub storage_location: Option<String>,
    /// Stocked | Reserved | Partially Distributed | Fully Distributed | Damaged
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::harvest::Entity",
        from = "Column::HarvestId",
        to = "super::harvest::Column::HarvestId"
    )]
    Harvest,
}

impl Related<super::harvest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Harvest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
