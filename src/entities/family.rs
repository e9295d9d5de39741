//! Family entity - Represents a group of users sharing expense records.
//!
//! Each family is identified by an opaque 8-character invite code generated
//! at creation time. Deleting a family cascades to its memberships, expenses,
//! incomes, expense templates, and family-scoped categories.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Family database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "families")]
pub struct Model {
    /// Unique identifier for the family
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Human-readable family name
    pub name: String,
    /// Opaque invite code granting membership, 8 chars from A-Z and 0-9
    #[sea_orm(unique, indexed)]
    pub invite_code: String,
    /// When the family was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Family and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One family has many memberships
    #[sea_orm(has_many = "super::family_member::Entity")]
    FamilyMembers,
    /// One family has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One family has many incomes
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    /// One family has many expense templates
    #[sea_orm(has_many = "super::expense_template::Entity")]
    ExpenseTemplates,
    /// One family has many custom categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
}

impl Related<super::family_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FamilyMembers.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl Related<super::expense_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseTemplates.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
