//! Expense entity - A single expense recorded by a user within a family.
//!
//! Amounts are fixed-point decimals with two fractional digits. The expense
//! `date` is separate from `created_at` so users can back-date records.
//! Expenses are removed when their owning user or family is deleted, but
//! block deletion of the category they reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the user who recorded the expense
    pub user_id: i32,
    /// ID of the family the expense belongs to
    pub family_id: i32,
    /// ID of the category classifying the expense
    pub category_id: i32,
    /// Amount spent, non-negative with two fractional digits
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    /// Optional free-text description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// When the expense occurred (defaults to creation time)
    pub date: DateTimeUtc,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// Telegram file id of an attached receipt photo, if any
    pub receipt_photo_id: Option<String>,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each expense belongs to one family
    #[sea_orm(
        belongs_to = "super::family::Entity",
        from = "Column::FamilyId",
        to = "super::family::Column::Id",
        on_delete = "Cascade"
    )]
    Family,
    /// Each expense references one category; the category cannot be
    /// deleted while referenced
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
