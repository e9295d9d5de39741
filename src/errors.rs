//! Unified error types and result handling.
//!
//! All fallible operations in this crate return [`Result`]. Constraint
//! violations raised by the storage layer (duplicate unique values, foreign
//! key and restrict-on-delete violations) pass through as [`Error::Database`]
//! without local recovery or retries.

use rust_decimal::Decimal;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem, fatal at startup.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The database URL names a backend this crate does not support.
    #[error("Unsupported database URL scheme: {scheme}")]
    UnsupportedScheme {
        /// The offending scheme, as written in the URL
        scheme: String,
    },

    /// A monetary amount failed validation.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// No user row exists for the given Telegram id.
    #[error("No user with telegram id {telegram_id}")]
    UserNotFound {
        /// Telegram id that was looked up
        telegram_id: i64,
    },

    /// No family row exists for the given id.
    #[error("No family with id {id}")]
    FamilyNotFound {
        /// Family primary key that was looked up
        id: i32,
    },

    /// No family row matches the given invite code.
    #[error("No family with invite code {code}")]
    InviteCodeNotFound {
        /// The code that failed to resolve
        code: String,
    },

    /// No category row exists for the given id.
    #[error("No category with id {id}")]
    CategoryNotFound {
        /// Category primary key that was looked up
        id: i32,
    },

    /// No expense template row exists for the given id.
    #[error("No expense template with id {id}")]
    TemplateNotFound {
        /// Template primary key that was looked up
        id: i32,
    },

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Storage-layer error, including constraint violations.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
