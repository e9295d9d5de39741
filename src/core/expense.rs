//! Expense business logic - Recording, listing, and deleting expenses.
//!
//! Amounts are fixed-point decimals and must be non-negative. The expense
//! date defaults to the time of recording but can be back-dated. Referential
//! checks (existing user, family, category) are left to the foreign keys;
//! violations surface from the storage layer.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Arguments for recording a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// User recording the expense
    pub user_id: i32,
    /// Family the expense belongs to
    pub family_id: i32,
    /// Category classifying the expense
    pub category_id: i32,
    /// Amount spent, non-negative
    pub amount: Decimal,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the expense occurred; None means now
    pub date: Option<DateTimeUtc>,
    /// Telegram file id of an attached receipt photo
    pub receipt_photo_id: Option<String>,
}

/// Records a new expense.
///
/// Negative amounts are rejected before touching the database.
pub async fn create_expense(
    db: &DatabaseConnection,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    if new_expense.amount < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new_expense.amount,
        });
    }

    let now = Utc::now();
    expense::ActiveModel {
        user_id: Set(new_expense.user_id),
        family_id: Set(new_expense.family_id),
        category_id: Set(new_expense.category_id),
        amount: Set(new_expense.amount),
        description: Set(new_expense.description),
        date: Set(new_expense.date.unwrap_or(now)),
        created_at: Set(now),
        receipt_photo_id: Set(new_expense.receipt_photo_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a specific expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i32,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a family's expenses, newest first, optionally bounded to a
/// half-open date range `[from, to)`.
pub async fn list_family_expenses(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Vec<expense::Model>> {
    let mut query = Expense::find().filter(expense::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(expense::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(expense::Column::Date.lt(to));
    }

    query
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists one member's expenses within a family, newest first.
pub async fn list_member_expenses(
    db: &DatabaseConnection,
    user_id: i32,
    family_id: i32,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::FamilyId.eq(family_id))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense. Returns true if a row was removed.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i32) -> Result<bool> {
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
