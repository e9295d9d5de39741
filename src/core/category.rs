//! Category business logic - Default seeding, custom categories, deletion.
//!
//! Six expense categories and five income categories are system defaults,
//! seeded once at initialization. Families can add their own categories on
//! top; custom categories disappear with their family, while deleting any
//! category still referenced by an expense or income is rejected by the
//! storage layer.

use crate::{
    entities::{Category, CategoryType, category},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// System default expense categories as (name, icon) pairs
pub const DEFAULT_EXPENSE_CATEGORIES: [(&str, &str); 6] = [
    ("Groceries", "🛒"),
    ("Transport", "🚗"),
    ("Entertainment", "🎮"),
    ("Health", "💊"),
    ("Clothing", "👕"),
    ("Other", "📦"),
];

/// System default income categories as (name, icon) pairs
pub const DEFAULT_INCOME_CATEGORIES: [(&str, &str); 5] = [
    ("Salary", "💼"),
    ("Bonus", "🏆"),
    ("Gifts", "🎁"),
    ("Cashback", "💳"),
    ("Other", "📦"),
];

/// Seeds the system default categories if they are not present yet.
///
/// Each category type is seeded independently: if any default row of a type
/// already exists, that type is skipped. Running this twice therefore leaves
/// exactly one row per default category.
pub async fn seed_default_categories(db: &DatabaseConnection) -> Result<()> {
    let existing = Category::find()
        .filter(category::Column::IsDefault.eq(true))
        .all(db)
        .await?;

    let has_expense_defaults = existing
        .iter()
        .any(|c| c.category_type == CategoryType::Expense);
    let has_income_defaults = existing
        .iter()
        .any(|c| c.category_type == CategoryType::Income);

    if has_expense_defaults && has_income_defaults {
        return Ok(());
    }

    let txn = db.begin().await?;

    if !has_expense_defaults {
        for (name, icon) in DEFAULT_EXPENSE_CATEGORIES {
            category::ActiveModel {
                name: Set(name.to_string()),
                icon: Set(icon.to_string()),
                is_default: Set(true),
                category_type: Set(CategoryType::Expense),
                family_id: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    if !has_income_defaults {
        for (name, icon) in DEFAULT_INCOME_CATEGORIES {
            category::ActiveModel {
                name: Set(name.to_string()),
                icon: Set(icon.to_string()),
                is_default: Set(true),
                category_type: Set(CategoryType::Income),
                family_id: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    info!("Seeded default categories.");
    Ok(())
}

/// Creates a custom category scoped to a family.
///
/// The `(family, name, type)` triple is unique at the storage layer, so a
/// duplicate name within the family surfaces as a constraint violation.
pub async fn create_category(
    db: &DatabaseConnection,
    family_id: i32,
    name: &str,
    icon: &str,
    category_type: CategoryType,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    category::ActiveModel {
        name: Set(name.trim().to_string()),
        icon: Set(icon.to_string()),
        is_default: Set(false),
        category_type: Set(category_type),
        family_id: Set(Some(family_id)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i32,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a system default category by name and type.
pub async fn get_default_category(
    db: &DatabaseConnection,
    name: &str,
    category_type: CategoryType,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::IsDefault.eq(true))
        .filter(category::Column::Name.eq(name))
        .filter(category::Column::CategoryType.eq(category_type))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the categories visible to a family: system defaults plus the
/// family's own custom categories, in seeding/creation order.
///
/// With `family_id = None` only the system defaults are returned.
pub async fn list_categories(
    db: &DatabaseConnection,
    family_id: Option<i32>,
    category_type: CategoryType,
) -> Result<Vec<category::Model>> {
    let mut visible = Condition::any().add(category::Column::IsDefault.eq(true));
    if let Some(family_id) = family_id {
        visible = visible.add(category::Column::FamilyId.eq(family_id));
    }

    Category::find()
        .filter(category::Column::CategoryType.eq(category_type))
        .filter(visible)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a category.
///
/// The storage layer rejects the deletion while any expense or income still
/// references the category (restrict); that violation surfaces as
/// [`Error::Database`] unretried.
pub async fn delete_category(db: &DatabaseConnection, category_id: i32) -> Result<()> {
    let result = Category::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CategoryNotFound { id: category_id });
    }
    Ok(())
}
