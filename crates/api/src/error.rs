use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gigscout_core::error::CoreError;
use gigscout_providers::music::MusicError;
use gigscout_providers::ticketing::TicketingError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Upstream detail (provider bodies, database messages) is logged, never
/// returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gigscout_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Favorites were requested but no database is connected.
    #[error("Database is not connected")]
    DatabaseUnavailable,

    /// The ticketing provider call failed. `context` is the client-facing message.
    #[error("{context}: {source}")]
    Ticketing {
        context: &'static str,
        #[source]
        source: TicketingError,
    },

    /// The music provider call failed. `context` is the client-facing message.
    #[error("{context}: {source}")]
    Music {
        context: &'static str,
        #[source]
        source: MusicError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// `map_err` adapter tagging a ticketing failure with its client-facing message.
    pub fn ticketing(context: &'static str) -> impl FnOnce(TicketingError) -> Self {
        move |source| Self::Ticketing { context, source }
    }

    /// `map_err` adapter tagging a music failure with its client-facing message.
    pub fn music(context: &'static str) -> impl FnOnce(MusicError) -> Self {
        move |source| Self::Music { context, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Storage ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
            AppError::DatabaseUnavailable => {
                tracing::warn!("Favorites requested while the database is not connected");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_UNAVAILABLE",
                    "Database is not connected".to_string(),
                )
            }

            // --- Providers ---
            AppError::Ticketing { context, source } => {
                tracing::error!(error = %source, "{context}");
                upstream_error(context)
            }
            AppError::Music { context, source } => {
                tracing::error!(error = %source, "{context}");
                upstream_error(context)
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn upstream_error(context: &str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "UPSTREAM_ERROR",
        context.to_string(),
    )
}
