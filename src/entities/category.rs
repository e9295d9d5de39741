//! Category entity - Classifies expenses and incomes.
//!
//! Six expense categories and five income categories are seeded as system
//! defaults (`is_default = true`, `family_id = NULL`); families may add their
//! own custom categories on top. A category cannot be deleted while any
//! expense or income still references it (restrict).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a category classifies expenses or incomes
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CategoryType {
    /// Category for expense records
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Category for income records
    #[sea_orm(string_value = "income")]
    Income,
}

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Human-readable name (e.g., "Groceries")
    pub name: String,
    /// Emoji glyph shown next to the name
    pub icon: String,
    /// Whether this is a system-seeded default category
    pub is_default: bool,
    /// Whether this category classifies expenses or incomes
    pub category_type: CategoryType,
    /// Owning family for custom categories, None for system defaults
    pub family_id: Option<i32>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One category has many incomes
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    /// Custom categories belong to one family
    #[sea_orm(
        belongs_to = "super::family::Entity",
        from = "Column::FamilyId",
        to = "super::family::Column::Id",
        on_delete = "Cascade"
    )]
    Family,
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

impl Related<super::family::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Family.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
