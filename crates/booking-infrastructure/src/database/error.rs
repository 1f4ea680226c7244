//! sqlx error mapping

use booking_schema::DbFailure;

/// Flatten a sqlx error into the store-agnostic failure type, keeping SQLSTATE.
pub fn db_failure(err: sqlx::Error) -> DbFailure {
    match &err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => DbFailure::with_code(code.into_owned(), db.message()),
            None => DbFailure::new(db.message()),
        },
        _ => DbFailure::new(err.to_string()),
    }
}
