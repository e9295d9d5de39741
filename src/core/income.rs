//! Income business logic - mirror of the expense operations.

use crate::{
    entities::{Income, income},
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Arguments for recording a new income.
#[derive(Debug, Clone)]
pub struct NewIncome {
    /// User recording the income
    pub user_id: i32,
    /// Family the income belongs to
    pub family_id: i32,
    /// Category classifying the income
    pub category_id: i32,
    /// Amount received, non-negative
    pub amount: Decimal,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the income occurred; None means now
    pub date: Option<DateTimeUtc>,
}

/// Records a new income. Negative amounts are rejected.
pub async fn create_income(db: &DatabaseConnection, new_income: NewIncome) -> Result<income::Model> {
    if new_income.amount < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new_income.amount,
        });
    }

    let now = Utc::now();
    income::ActiveModel {
        user_id: Set(new_income.user_id),
        family_id: Set(new_income.family_id),
        category_id: Set(new_income.category_id),
        amount: Set(new_income.amount),
        description: Set(new_income.description),
        date: Set(new_income.date.unwrap_or(now)),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists a family's incomes, newest first, optionally bounded to `[from, to)`.
pub async fn list_family_incomes(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Vec<income::Model>> {
    let mut query = Income::find().filter(income::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(income::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(income::Column::Date.lt(to));
    }

    query
        .order_by_desc(income::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an income. Returns true if a row was removed.
pub async fn delete_income(db: &DatabaseConnection, income_id: i32) -> Result<bool> {
    let result = Income::delete_by_id(income_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
