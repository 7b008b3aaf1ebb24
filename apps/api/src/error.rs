//! Error handling for the Aurum API
//!
//! Service and resolver failures are expressed as [`ApiError`]. Each variant
//! carries an HTTP-equivalent status, used to pick a log severity, and a
//! stable error code that clients receive in the GraphQL error's
//! `extensions.code`.

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use thiserror::Error;

use crate::repositories::StoreError;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Authentication ==========
    /// Missing authentication credentials
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid token (expired, malformed, wrong audience)
    #[error("invalid authentication token: {0}")]
    InvalidToken(String),

    // ========== Resource Errors ==========
    /// Requested resource does not exist or belongs to another user
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("{0}")]
    ValidationError(String),

    // ========== Data Store Errors ==========
    /// Hierarchy store query failed
    #[error("data store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::Database(sqlx::Error::PoolTimedOut)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }

    /// Convert into a GraphQL field error
    ///
    /// Server-side failures are logged and reported with a generic message
    /// so store details never reach the client.
    pub fn into_graphql(self) -> async_graphql::Error {
        self.log();
        let code = self.error_code();
        let message = if self.status_code().is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };
        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
