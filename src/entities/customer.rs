use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    #[sea_orm(has_many = "super::customer_plan::Entity")]
    Memberships,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::customer_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

// Many-to-many to plans through the membership table.
impl Related<super::plan::Entity> for Entity {
    fn to() -> RelationDef {
        super::customer_plan::Relation::Plan.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::customer_plan::Relation::Customer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
