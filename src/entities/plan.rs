use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription plan. Price is stored in minor currency units.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_plan::Entity")]
    Memberships,
}

impl Related<super::customer_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        super::customer_plan::Relation::Customer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::customer_plan::Relation::Plan.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
