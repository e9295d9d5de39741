//! User entity - Represents a Telegram user of the expense tracker.
//!
//! Each user is identified by their Telegram id and carries per-user display
//! settings (currency, timezone, date format) plus notification preferences.
//! Deleting a user cascades to their memberships, expenses, incomes, and
//! expense templates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Telegram user id, unique across all users
    #[sea_orm(unique, indexed)]
    pub telegram_id: i64,
    /// Display name as reported by Telegram
    pub name: String,
    /// Optional Telegram username (handle without the leading `@`)
    pub username: Option<String>,
    /// When the user was first seen
    pub created_at: DateTimeUtc,
    /// Currency symbol used when formatting amounts for this user
    pub currency: String,
    /// IANA timezone name used for date calculations
    pub timezone: String,
    /// Preferred date display format (e.g., `"DD.MM.YYYY"`)
    pub date_format: String,
    /// Whether a monthly spending summary should be delivered
    pub monthly_summary_enabled: bool,
    /// Delivery time for the monthly summary, `"HH:MM"` on the 1st
    pub monthly_summary_time: Option<String>,
    /// When the last monthly summary was delivered
    pub last_monthly_summary_sent: Option<DateTimeUtc>,
    /// Whether to notify this user when family members add expenses
    pub expense_notifications_enabled: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many family memberships
    #[sea_orm(has_many = "super::family_member::Entity")]
    FamilyMembers,
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One user has many incomes
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    /// One user has many expense templates
    #[sea_orm(has_many = "super::expense_template::Entity")]
    ExpenseTemplates,
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

impl ActiveModelBehavior for ActiveModel {}
