//! Seedling distribution entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seedling_distributions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub distribution_id: String,
    pub farmer_id: String,
    pub variety: String,
    pub quantity: i32,
    /// Officer who released the seedlings.
    pub distributed_by: Option<String>,
    pub distribution_date: Option<Date>,
    /// Requested | Approved | Released | Rejected
    pub status: String,
    pub notes: Option<String>,
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
