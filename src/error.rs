use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Public body for storage failures on read paths.
pub const READ_FAILED: &str = "Error retrieving data";
/// Public body for a failed lookup by id.
pub const LOOKUP_FAILED: &str = "Error retrieving data...";
/// Public body for a failed insert.
pub const SAVE_FAILED: &str = "Error saving a book...";
/// Public body for failed update, toggle and delete statements.
pub const UPDATE_FAILED: &str = "Error updating data...";

/// The primary error type for the application.
///
/// Every variant renders as a plain-text body. Storage failures never leak their
/// details to the client; they are logged together with a generated error id.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Any failure reported by the data backend, including a statement that ran past
    /// the configured query timeout.
    #[error("Storage error: {detail}")]
    Storage {
        /// Text sent to the client.
        public: &'static str,
        /// Backend message, logged only.
        detail: String,
    },
    /// A lookup or filter matched no rows.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn storage(detail: impl Into<String>) -> Self {
        AppError::Storage { public: READ_FAILED, detail: detail.into() }
    }

    /// Replaces the client-facing text of a storage error; other variants pass through.
    pub fn publicly(self, message: &'static str) -> Self {
        match self {
            AppError::Storage { detail, .. } => AppError::Storage { public: message, detail },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Storage { public, detail } => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Storage error: {}", detail);
                (status, public).into_response()
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (status, msg).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Book not found !".to_string()),
            sqlx::Error::Database(db_err) => AppError::storage(format!("Database error: {}", db_err.message())),
            sqlx::Error::PoolTimedOut => AppError::storage("Database connection pool timed out"),
            _ => AppError::storage(format!("Database error: {}", err)),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Converts an empty `Option` into a `NotFound` error carrying `message`.
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}
