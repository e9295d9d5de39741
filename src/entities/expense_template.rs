//! Expense template entity - Saved presets for quick expense entry.
//!
//! Templates are per-user, per-family presets. Applying a template records a
//! regular expense with the template's category, amount, and description.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user who owns the template
    pub user_id: i32,
    /// ID of the family the template belongs to
    pub family_id: i32,
    /// Short name shown in the quick-entry menu (e.g., "Morning coffee")
    pub name: String,
    /// ID of the category applied expenses are classified under
    pub category_id: i32,
    /// Preset amount with two fractional digits
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    /// Optional preset description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// When the template was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ExpenseTemplate and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each template belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each template belongs to one family
    #[sea_orm(
        belongs_to = "super::family::Entity",
        from = "Column::FamilyId",
        to = "super::family::Column::Id",
        on_delete = "Cascade"
    )]
    Family,
    /// Each template references one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::family::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Family.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
