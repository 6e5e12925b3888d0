//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StorageError` from
//! `eventgrid_core::storage`.

use eventgrid_core::storage::StorageError;

/// Maps a rusqlite error to a StorageError.
///
/// - Errors opening the database file → `StorageError::ConnectionFailed`
/// - All other errors → `StorageError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> StorageError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            StorageError::ConnectionFailed(format!("Cannot open database: {err}"))
        }
        _ => StorageError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StorageError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> StorageError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            StorageError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => StorageError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    #[test]
    fn test_cannot_open_maps_to_connection_failed() {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::CannotOpen,
            extended_code: ffi::SQLITE_CANTOPEN,
        };
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None));

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            StorageError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_query_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(
            map_tokio_rusqlite_error(err),
            StorageError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_connection_closed_maps_to_connection_failed() {
        let err = tokio_rusqlite::Error::ConnectionClosed;
        assert!(matches!(
            map_tokio_rusqlite_error(err),
            StorageError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));
        assert!(matches!(
            map_tokio_rusqlite_error(err),
            StorageError::QueryFailed(_)
        ));
    }
}
