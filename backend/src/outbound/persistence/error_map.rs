//! Shared mapping from Diesel failures to port error variants.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{DocumentPersistenceError, UserPersistenceError};

use super::pool::PoolError;

pub(super) fn map_user_query_error(error: DieselError) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::Duplicate
        }
        other => UserPersistenceError::query(other.to_string()),
    }
}

pub(super) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.to_string())
}

pub(super) fn map_document_query_error(error: DieselError) -> DocumentPersistenceError {
    DocumentPersistenceError::query(error.to_string())
}

pub(super) fn map_document_pool_error(error: PoolError) -> DocumentPersistenceError {
    DocumentPersistenceError::connection(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_becomes_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(map_user_query_error(error), UserPersistenceError::Duplicate);
    }

    #[rstest]
    fn other_database_errors_become_query_failures() {
        let error = DieselError::NotFound;
        assert!(matches!(
            map_user_query_error(error),
            UserPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_failures_become_connection_failures() {
        let error = PoolError::checkout("timed out");
        assert!(matches!(
            map_document_pool_error(error),
            DocumentPersistenceError::Connection { .. }
        ));
    }
}
