//! User business logic - Registration, lookups, and per-user settings.
//!
//! Users are keyed by their Telegram id. Registration is get-or-create:
//! repeat registrations refresh the display name and username reported by
//! the platform instead of failing on the unique constraint.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};

/// Currency symbol assigned to newly registered users
pub const DEFAULT_CURRENCY: &str = "₽";
/// Timezone assigned to newly registered users
pub const DEFAULT_TIMEZONE: &str = "Europe/Moscow";
/// Date display format assigned to newly registered users
pub const DEFAULT_DATE_FORMAT: &str = "DD.MM.YYYY";

/// Finds a user by their Telegram id, returning None if not registered.
pub async fn get_user_by_telegram_id(
    db: &DatabaseConnection,
    telegram_id: i64,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::TelegramId.eq(telegram_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a user, or refreshes an existing registration.
///
/// If a user with this Telegram id already exists, their display name and
/// username are updated to the values the platform currently reports and the
/// stored settings are left untouched. New users receive the default
/// currency, timezone, and notification settings.
pub async fn register_user(
    db: &DatabaseConnection,
    telegram_id: i64,
    name: &str,
    username: Option<&str>,
) -> Result<user::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "User name cannot be empty".to_string(),
        });
    }

    if let Some(existing) = get_user_by_telegram_id(db, telegram_id).await? {
        if existing.name == name && existing.username.as_deref() == username {
            return Ok(existing);
        }

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(name.trim().to_string());
        active.username = Set(username.map(str::to_string));
        return active.update(db).await.map_err(Into::into);
    }

    let new_user = user::ActiveModel {
        telegram_id: Set(telegram_id),
        name: Set(name.trim().to_string()),
        username: Set(username.map(str::to_string)),
        created_at: Set(Utc::now()),
        currency: Set(DEFAULT_CURRENCY.to_string()),
        timezone: Set(DEFAULT_TIMEZONE.to_string()),
        date_format: Set(DEFAULT_DATE_FORMAT.to_string()),
        monthly_summary_enabled: Set(false),
        monthly_summary_time: Set(None),
        last_monthly_summary_sent: Set(None),
        expense_notifications_enabled: Set(true),
        ..Default::default()
    };

    new_user.insert(db).await.map_err(Into::into)
}

/// Updates the currency symbol a user sees in formatted amounts.
pub async fn update_currency(
    db: &DatabaseConnection,
    telegram_id: i64,
    currency: &str,
) -> Result<user::Model> {
    let user = get_user_by_telegram_id(db, telegram_id)
        .await?
        .ok_or(Error::UserNotFound { telegram_id })?;

    let mut active: user::ActiveModel = user.into();
    active.currency = Set(currency.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Enables or disables the monthly spending summary for a user.
///
/// `time` is the delivery time on the 1st of the month in `"HH:MM"` form;
/// it is cleared when the summary is disabled.
pub async fn set_monthly_summary(
    db: &DatabaseConnection,
    telegram_id: i64,
    enabled: bool,
    time: Option<String>,
) -> Result<user::Model> {
    let user = get_user_by_telegram_id(db, telegram_id)
        .await?
        .ok_or(Error::UserNotFound { telegram_id })?;

    let mut active: user::ActiveModel = user.into();
    active.monthly_summary_enabled = Set(enabled);
    active.monthly_summary_time = Set(if enabled { time } else { None });
    active.update(db).await.map_err(Into::into)
}

/// Enables or disables notifications about family members' new expenses.
pub async fn set_expense_notifications(
    db: &DatabaseConnection,
    telegram_id: i64,
    enabled: bool,
) -> Result<user::Model> {
    let user = get_user_by_telegram_id(db, telegram_id)
        .await?
        .ok_or(Error::UserNotFound { telegram_id })?;

    let mut active: user::ActiveModel = user.into();
    active.expense_notifications_enabled = Set(enabled);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a user row.
///
/// The user's memberships, expenses, incomes, and templates are removed by
/// the cascade rules declared on the schema.
pub async fn delete_user(db: &DatabaseConnection, user_id: i32) -> Result<bool> {
    let result = User::delete_by_id(user_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
