//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A required text field was empty or only contained whitespace.
    #[error("the field \"{0}\" is required and cannot be empty")]
    EmptyField(&'static str),

    /// An amount was negative, NaN or infinite.
    ///
    /// Ledger amounts record money that changed hands, so only finite,
    /// non-negative values are accepted.
    #[error("the field \"{field}\" must be a non-negative number, got {value}")]
    InvalidAmount {
        /// The JSON name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A ledger entry referred to a customer or supplier that does not exist.
    #[error("the referenced party does not exist")]
    UnknownParty,

    /// The request body could not be parsed as the expected JSON payload.
    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    /// A path segment or query string parameter could not be parsed.
    #[error("invalid request parameter: {0}")]
    InvalidParameter(String),

    /// The configured timezone is not a valid, canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The body of a response produced by a handler could not be read.
    #[error("could not read the response body: {0}")]
    ResponseBodyError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::UnknownParty
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidPayload(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidParameter(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidParameter(rejection.body_text())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A short, human readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::EmptyField(_)
            | Error::InvalidAmount { .. }
            | Error::UnknownParty
            | Error::InvalidPayload(_)
            | Error::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Error::InvalidTimezoneError(timezone) => {
                tracing::error!(
                    "Could not get local timezone \"{timezone}\". Check the server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Server side errors are not intended to be shown to the client.
        let message = if status.is_server_error() {
            "Server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::{Connection, ffi};

    use super::Error;

    async fn body_json(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        (status, serde_json::from_slice(&bytes).expect("body is not JSON"))
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn foreign_key_failure_maps_to_unknown_party() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "PRAGMA foreign_keys = ON;
                CREATE TABLE parent (id INTEGER PRIMARY KEY);
                CREATE TABLE child (
                    id INTEGER PRIMARY KEY,
                    parent_id INTEGER NOT NULL REFERENCES parent(id)
                );",
            )
            .unwrap();

        let error: Error = connection
            .execute("INSERT INTO child (parent_id) VALUES (42)", ())
            .unwrap_err()
            .into();

        assert_eq!(error, Error::UnknownParty);
    }

    #[test]
    fn other_sql_errors_are_wrapped() {
        let sql_error = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            Some("database is locked".to_owned()),
        );

        let error: Error = sql_error.into();

        assert!(matches!(error, Error::SqlError(_)));
    }

    #[tokio::test]
    async fn not_found_is_404_with_error_body() {
        let (status, body) = body_json(Error::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn validation_errors_are_400() {
        for error in [
            Error::EmptyField("shopName"),
            Error::InvalidAmount {
                field: "amountPurchased",
                value: -1.0,
            },
            Error::UnknownParty,
            Error::InvalidPayload("missing field".to_owned()),
            Error::InvalidParameter("not a number".to_owned()),
        ] {
            let (status, body) = body_json(error).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        for error in [
            Error::DatabaseLockError,
            Error::ResponseBodyError("length limit exceeded".to_owned()),
        ] {
            let (status, body) = body_json(error).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "Server error");
        }
    }
}
