//! Database lifecycle management.
//!
//! This module owns the connection-string handling and schema creation for
//! the expense tracker. Connection strings are normalized before the engine
//! opens: the scheme identifies the backend (`SQLite` or `PostgreSQL`), and
//! synchronous-driver decorations carried over from other deployments
//! (e.g. `sqlite+aiosqlite://`, `postgresql+psycopg2://`) are rewritten to
//! the form the async driver accepts. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` so the database schema always matches
//! the entity definitions, with the composite unique and secondary indexes
//! added on top.

use crate::entities::{
    Category, Expense, ExpenseTemplate, Family, FamilyMember, Income, User, category, expense,
    expense_template, family_member, income,
};
use crate::errors::{Error, Result};
use sea_orm::sea_query::{Index, IndexCreateStatement, Table};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/family_ledger.sqlite?mode=rwc".to_string()))
}

/// Normalizes a connection string to the form the async driver accepts.
///
/// The backend is detected from the URL scheme. Driver decorations after a
/// `+` are stripped, and `postgresql` is rewritten to `postgres`. Anything
/// other than `SQLite` or `PostgreSQL` is rejected.
pub fn normalize_database_url(url: &str) -> Result<String> {
    // Keep whatever follows the scheme untouched, including the "//" of
    // authority-form URLs and the ":memory:" shorthand of SQLite.
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (scheme, format!("//{rest}")),
        None => match url.split_once(':') {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme, rest.to_string()),
            _ => {
                return Err(Error::Config {
                    message: format!("Database URL has no scheme: {url}"),
                });
            }
        },
    };

    let backend = scheme.split_once('+').map_or(scheme, |(backend, _)| backend);

    match backend {
        "sqlite" => Ok(format!("sqlite:{rest}")),
        "postgres" | "postgresql" => Ok(format!("postgres:{rest}")),
        _ => Err(Error::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

/// Opens the engine and connection pool for the given connection string.
///
/// The URL is normalized first, so callers may pass either the async form or
/// a synchronous-driver variant. This is the single process-wide engine; it
/// stays open until [`close`] is called.
pub async fn create_connection(url: &str) -> Result<DatabaseConnection> {
    let database_url = normalize_database_url(url)?;
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all database tables and indexes from the entity definitions.
///
/// Tables are created parent-first so foreign keys resolve on backends that
/// validate references at creation time. All statements carry IF NOT EXISTS,
/// so the call is idempotent against an already-initialized database.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tables = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Family),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(FamilyMember),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(Income),
        schema.create_table_from_entity(ExpenseTemplate),
    ];

    for table in &mut tables {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    // Single-column indexes declared on the entities (telegram_id, invite_code)
    let mut single_column_indexes: Vec<IndexCreateStatement> = Vec::new();
    single_column_indexes.extend(schema.create_index_from_entity(User));
    single_column_indexes.extend(schema.create_index_from_entity(Family));

    // Composite uniqueness and query-path indexes
    let composite_indexes = [
        Index::create()
            .name("uq_family_members_user_family")
            .table(FamilyMember)
            .col(family_member::Column::UserId)
            .col(family_member::Column::FamilyId)
            .unique()
            .to_owned(),
        Index::create()
            .name("uq_categories_family_name_type")
            .table(Category)
            .col(category::Column::FamilyId)
            .col(category::Column::Name)
            .col(category::Column::CategoryType)
            .unique()
            .to_owned(),
        Index::create()
            .name("ix_expenses_user_family")
            .table(Expense)
            .col(expense::Column::UserId)
            .col(expense::Column::FamilyId)
            .to_owned(),
        Index::create()
            .name("ix_expenses_family_date")
            .table(Expense)
            .col(expense::Column::FamilyId)
            .col(expense::Column::Date)
            .to_owned(),
        Index::create()
            .name("ix_expenses_category")
            .table(Expense)
            .col(expense::Column::CategoryId)
            .to_owned(),
        Index::create()
            .name("ix_incomes_user_family")
            .table(Income)
            .col(income::Column::UserId)
            .col(income::Column::FamilyId)
            .to_owned(),
        Index::create()
            .name("ix_incomes_family_date")
            .table(Income)
            .col(income::Column::FamilyId)
            .col(income::Column::Date)
            .to_owned(),
        Index::create()
            .name("ix_incomes_category")
            .table(Income)
            .col(income::Column::CategoryId)
            .to_owned(),
        Index::create()
            .name("ix_expense_templates_user_family")
            .table(ExpenseTemplate)
            .col(expense_template::Column::UserId)
            .col(expense_template::Column::FamilyId)
            .to_owned(),
    ];

    for mut index in single_column_indexes.into_iter().chain(composite_indexes) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}

/// Initializes the database: creates tables, then seeds default categories.
///
/// This is the startup entry point; both steps are idempotent.
pub async fn init_database(db: &DatabaseConnection) -> Result<()> {
    create_tables(db).await?;
    crate::core::category::seed_default_categories(db).await?;
    Ok(())
}

/// Drops all database tables. Use with caution.
///
/// Child tables are dropped before their parents so foreign keys never
/// dangle mid-drop.
pub async fn drop_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();

    let drops = [
        Table::drop().table(Expense).if_exists().to_owned(),
        Table::drop().table(Income).if_exists().to_owned(),
        Table::drop().table(ExpenseTemplate).if_exists().to_owned(),
        Table::drop().table(FamilyMember).if_exists().to_owned(),
        Table::drop().table(Category).if_exists().to_owned(),
        Table::drop().table(Family).if_exists().to_owned(),
        Table::drop().table(User).if_exists().to_owned(),
    ];

    for statement in &drops {
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}

/// Resets the database: drops all tables, recreates them, and reseeds the
/// default categories. Destructive - intended for tests and development.
pub async fn reset_database(db: &DatabaseConnection) -> Result<()> {
    drop_tables(db).await?;
    create_tables(db).await?;
    crate::core::category::seed_default_categories(db).await?;
    info!("Database reset: all tables dropped and recreated.");
    Ok(())
}

/// Disposes the engine and releases pooled connections.
///
/// After this call the process holds no database state; a new engine must be
/// opened with [`create_connection`] before further use.
pub async fn close(db: DatabaseConnection) -> Result<()> {
    db.close().await.map_err(Into::into)
}
