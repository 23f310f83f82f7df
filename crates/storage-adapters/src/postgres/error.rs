use domains::{AppError, StoreFailure};

/// Wraps a driver error as a store failure, keeping the SQLSTATE when the
/// server supplied one. Classification is left to `AppError::classify`.
pub(crate) fn store_error(err: sqlx::Error) -> AppError {
    let failure = match &err {
        sqlx::Error::Database(db) => {
            StoreFailure::new(db.code().map(|code| code.into_owned()), db.message())
        }
        other => StoreFailure::new(None, other.to_string()),
    };
    tracing::debug!(code = ?failure.code, error = %err, "statement failed");
    AppError::Store(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ErrorKind;

    #[test]
    fn test_driver_errors_without_sqlstate_are_internal() {
        let err = store_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.classify(), ErrorKind::InternalError);
        match err {
            AppError::Store(failure) => assert_eq!(failure.code, None),
            other => panic!("unexpected {other:?}"),
        }
    }
}
