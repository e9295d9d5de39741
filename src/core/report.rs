//! Statistics business logic - Aggregated family spending queries.
//!
//! All aggregation happens SQL-side (SUM / GROUP BY); functions return
//! structured data for the presentation layer to format. Totals are fixed
//! point; an empty result set sums to zero.

use crate::{
    entities::{Expense, Income, expense, income},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect, prelude::*};

#[derive(Debug, FromQueryResult)]
struct TotalRow {
    total: Option<Decimal>,
}

/// Spending total for one category within a family.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct CategoryTotal {
    /// Category the expenses were classified under
    pub category_id: i32,
    /// Sum of amounts in that category
    pub total: Decimal,
}

/// Spending total for one family member.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct MemberTotal {
    /// User who recorded the expenses
    pub user_id: i32,
    /// Sum of that user's amounts
    pub total: Decimal,
}

/// Sums a family's expenses, optionally bounded to `[from, to)`.
pub async fn family_expense_total(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Decimal> {
    let mut query = Expense::find()
        .select_only()
        .column_as(expense::Column::Amount.sum(), "total")
        .filter(expense::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(expense::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(expense::Column::Date.lt(to));
    }

    let row = query.into_model::<TotalRow>().one(db).await?;
    Ok(row.and_then(|r| r.total).unwrap_or_default())
}

/// Sums a family's incomes, optionally bounded to `[from, to)`.
pub async fn family_income_total(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Decimal> {
    let mut query = Income::find()
        .select_only()
        .column_as(income::Column::Amount.sum(), "total")
        .filter(income::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(income::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(income::Column::Date.lt(to));
    }

    let row = query.into_model::<TotalRow>().one(db).await?;
    Ok(row.and_then(|r| r.total).unwrap_or_default())
}

/// Breaks a family's expenses down by category, biggest spender category
/// first.
pub async fn family_expense_totals_by_category(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Vec<CategoryTotal>> {
    let mut query = Expense::find()
        .select_only()
        .column(expense::Column::CategoryId)
        .column_as(expense::Column::Amount.sum(), "total")
        .filter(expense::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(expense::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(expense::Column::Date.lt(to));
    }

    query
        .group_by(expense::Column::CategoryId)
        .order_by_desc(expense::Column::Amount.sum())
        .into_model::<CategoryTotal>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Breaks a family's expenses down by member, biggest spender first.
pub async fn family_expense_totals_by_member(
    db: &DatabaseConnection,
    family_id: i32,
    from: Option<DateTimeUtc>,
    to: Option<DateTimeUtc>,
) -> Result<Vec<MemberTotal>> {
    let mut query = Expense::find()
        .select_only()
        .column(expense::Column::UserId)
        .column_as(expense::Column::Amount.sum(), "total")
        .filter(expense::Column::FamilyId.eq(family_id));

    if let Some(from) = from {
        query = query.filter(expense::Column::Date.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(expense::Column::Date.lt(to));
    }

    query
        .group_by(expense::Column::UserId)
        .order_by_desc(expense::Column::Amount.sum())
        .into_model::<MemberTotal>()
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::expense::{NewExpense, create_expense};
    use crate::core::family::join_family;
    use crate::core::income::{NewIncome, create_income};
    use crate::entities::CategoryType;
    use crate::test_utils::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_family_expense_total_worked_example() -> Result<()> {
        // User -> family -> admin membership -> one expense of 1500.50
        let db = setup_seeded_db().await?;
        let user = crate::core::user::register_user(&db, 123_456_789, "Alice", None).await?;
        let (created_family, membership) =
            crate::core::family::create_family(&db, "Smiths", user.id).await?;
        assert_eq!(membership.role, crate::entities::Role::Admin);

        let groceries = default_expense_category(&db, "Groceries").await?;
        create_expense(
            &db,
            NewExpense {
                user_id: user.id,
                family_id: created_family.id,
                category_id: groceries.id,
                amount: "1500.50".parse().unwrap(),
                description: None,
                date: None,
                receipt_photo_id: None,
            },
        )
        .await?;

        let total = family_expense_total(&db, created_family.id, None, None).await?;
        assert_eq!(total, "1500.50".parse::<Decimal>().unwrap());

        Ok(())
    }

    #[tokio::test]
    async fn test_family_expense_total_empty_family_is_zero() -> Result<()> {
        let (db, _user, created_family) = setup_with_family().await?;

        let total = family_expense_total(&db, created_family.id, None, None).await?;
        assert_eq!(total, Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn test_family_expense_total_respects_date_bounds() -> Result<()> {
        let (db, user, created_family) = setup_with_family().await?;
        let groceries = default_expense_category(&db, "Groceries").await?;

        let now = Utc::now();
        for (days_ago, cents) in [(1_i64, 10_00), (40, 20_00)] {
            create_expense(
                &db,
                NewExpense {
                    user_id: user.id,
                    family_id: created_family.id,
                    category_id: groceries.id,
                    amount: Decimal::new(cents, 2),
                    description: None,
                    date: Some(now - Duration::days(days_ago)),
                    receipt_photo_id: None,
                },
            )
            .await?;
        }

        let this_month =
            family_expense_total(&db, created_family.id, Some(now - Duration::days(30)), None)
                .await?;
        assert_eq!(this_month, Decimal::new(10_00, 2));

        let all_time = family_expense_total(&db, created_family.id, None, None).await?;
        assert_eq!(all_time, Decimal::new(30_00, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_totals_by_category_and_member() -> Result<()> {
        let (db, alice, created_family) = setup_with_family().await?;
        let bob = create_test_user(&db, 2).await?;
        join_family(&db, &created_family.invite_code, bob.id).await?;

        let groceries = default_expense_category(&db, "Groceries").await?;
        let transport = default_expense_category(&db, "Transport").await?;

        create_test_expense(
            &db,
            alice.id,
            created_family.id,
            groceries.id,
            Decimal::new(30_00, 2),
        )
        .await?;
        create_test_expense(
            &db,
            alice.id,
            created_family.id,
            transport.id,
            Decimal::new(5_00, 2),
        )
        .await?;
        create_test_expense(
            &db,
            bob.id,
            created_family.id,
            groceries.id,
            Decimal::new(20_00, 2),
        )
        .await?;

        let by_category =
            family_expense_totals_by_category(&db, created_family.id, None, None).await?;
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[0].category_id, groceries.id);
        assert_eq!(by_category[0].total, Decimal::new(50_00, 2));
        assert_eq!(by_category[1].category_id, transport.id);
        assert_eq!(by_category[1].total, Decimal::new(5_00, 2));

        let by_member =
            family_expense_totals_by_member(&db, created_family.id, None, None).await?;
        assert_eq!(by_member.len(), 2);
        assert_eq!(by_member[0].user_id, alice.id);
        assert_eq!(by_member[0].total, Decimal::new(35_00, 2));
        assert_eq!(by_member[1].user_id, bob.id);
        assert_eq!(by_member[1].total, Decimal::new(20_00, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_family_income_total() -> Result<()> {
        let (db, user, created_family) = setup_with_family().await?;
        let salary = crate::core::category::get_default_category(
            &db,
            "Salary",
            CategoryType::Income,
        )
        .await?
        .unwrap();

        create_income(
            &db,
            NewIncome {
                user_id: user.id,
                family_id: created_family.id,
                category_id: salary.id,
                amount: Decimal::new(1000_00, 2),
                description: None,
                date: None,
            },
        )
        .await?;

        let total = family_income_total(&db, created_family.id, None, None).await?;
        assert_eq!(total, Decimal::new(1000_00, 2));

        Ok(())
    }
}
