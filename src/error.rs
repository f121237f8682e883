use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::validation::{ValidationError, Violation};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid row: {0}")]
    Validation(#[from] ValidationError),
    #[error("not-null violation: {message}")]
    NotNullViolation { message: String },
    #[error("value too long: {message}")]
    ValueTooLong { message: String },
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),
}

impl StoreError {
    pub fn is_not_null_violation(&self) -> bool {
        matches!(self, StoreError::NotNullViolation { .. })
    }

    pub fn is_value_too_long(&self) -> bool {
        matches!(
            self,
            StoreError::ValueTooLong { .. }
                | StoreError::Validation(ValidationError {
                    violation: Violation::TooLong { .. },
                    ..
                })
        )
    }
}

impl From<DieselError> for StoreError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
                StoreError::NotNullViolation {
                    message: info.message().to_string(),
                }
            }
            // SQLSTATE 22001 has no dedicated diesel kind and diesel does not
            // expose the code, so this matches the English server message. With a
            // non-English `lc_messages` it falls through to `Database`.
            DieselError::DatabaseError(_, ref info)
                if info.message().starts_with("value too long") =>
            {
                StoreError::ValueTooLong {
                    message: info.message().to_string(),
                }
            }
            other => StoreError::Database(other),
        }
    }
}
