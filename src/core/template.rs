//! Expense template business logic - Presets for quick expense entry.
//!
//! Templates are per-user, per-family presets. Applying one records a
//! regular expense with the template's category, amount, and description.

use crate::{
    core::expense::{self, NewExpense},
    entities::{ExpenseTemplate, expense_template},
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Arguments for creating an expense template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    /// User owning the template
    pub user_id: i32,
    /// Family the template belongs to
    pub family_id: i32,
    /// Short name shown in the quick-entry menu
    pub name: String,
    /// Category applied expenses are classified under
    pub category_id: i32,
    /// Preset amount, non-negative
    pub amount: Decimal,
    /// Optional preset description
    pub description: Option<String>,
}

/// Creates an expense template.
pub async fn create_template(
    db: &DatabaseConnection,
    new_template: NewTemplate,
) -> Result<expense_template::Model> {
    if new_template.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Template name cannot be empty".to_string(),
        });
    }
    if new_template.amount < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new_template.amount,
        });
    }

    expense_template::ActiveModel {
        user_id: Set(new_template.user_id),
        family_id: Set(new_template.family_id),
        name: Set(new_template.name.trim().to_string()),
        category_id: Set(new_template.category_id),
        amount: Set(new_template.amount),
        description: Set(new_template.description),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists a user's templates within a family, oldest first.
pub async fn list_templates(
    db: &DatabaseConnection,
    user_id: i32,
    family_id: i32,
) -> Result<Vec<expense_template::Model>> {
    ExpenseTemplate::find()
        .filter(expense_template::Column::UserId.eq(user_id))
        .filter(expense_template::Column::FamilyId.eq(family_id))
        .order_by_asc(expense_template::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a template: records an expense with the template's preset values,
/// dated now.
pub async fn apply_template(
    db: &DatabaseConnection,
    template_id: i32,
) -> Result<crate::entities::ExpenseModel> {
    let template = ExpenseTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::TemplateNotFound { id: template_id })?;

    expense::create_expense(
        db,
        NewExpense {
            user_id: template.user_id,
            family_id: template.family_id,
            category_id: template.category_id,
            amount: template.amount,
            description: template.description.clone(),
            date: None,
            receipt_photo_id: None,
        },
    )
    .await
}

/// Deletes a template. Returns true if a row was removed.
pub async fn delete_template(db: &DatabaseConnection, template_id: i32) -> Result<bool> {
    let result = ExpenseTemplate::delete_by_id(template_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
