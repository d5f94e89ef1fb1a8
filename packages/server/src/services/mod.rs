//! Data-access services. Each borrows a connection (pool or transaction) and
//! returns `AppError`, so handlers stay thin and tests can run against a mock
//! connection.

pub mod approval;
pub mod contest;
pub mod vote;

use sea_orm::{DbErr, SqlErr};

/// True when the store rejected an insert because the key already exists.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
