//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{category, expense, family, user},
    entities::{self, CategoryType},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Like [`setup_test_db`], but with the default categories seeded.
/// Use this when the test records expenses or incomes.
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    category::seed_default_categories(&db).await?;
    Ok(db)
}

/// Registers a test user with sensible defaults.
///
/// # Defaults
/// * `name`: "Test User"
/// * `username`: "testuser"
pub async fn create_test_user(
    db: &DatabaseConnection,
    telegram_id: i64,
) -> Result<entities::user::Model> {
    user::register_user(db, telegram_id, "Test User", Some("testuser")).await
}

/// Creates a family named "Test Family" with the given user as admin.
pub async fn create_test_family(
    db: &DatabaseConnection,
    creator_user_id: i32,
) -> Result<(entities::family::Model, entities::family_member::Model)> {
    family::create_family(db, "Test Family", creator_user_id).await
}

/// Records a test expense dated now with no description.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: i32,
    family_id: i32,
    category_id: i32,
    amount: Decimal,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        expense::NewExpense {
            user_id,
            family_id,
            category_id,
            amount,
            description: None,
            date: None,
            receipt_photo_id: None,
        },
    )
    .await
}

/// Looks up a seeded default expense category by name.
pub async fn default_expense_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    Ok(category::get_default_category(db, name, CategoryType::Expense)
        .await?
        .expect("default categories are seeded in test databases"))
}

/// Sets up a seeded database with one registered user and their family.
/// Returns (db, user, family) for common test scenarios.
pub async fn setup_with_family() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::family::Model,
)> {
    let db = setup_seeded_db().await?;
    let test_user = create_test_user(&db, 1_000_001).await?;
    let (test_family, _membership) = create_test_family(&db, test_user.id).await?;
    Ok((db, test_user, test_family))
}
