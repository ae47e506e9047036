use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::r2d2;
use serde_json::json;
use std::fmt;

use crate::classifier::types::ClassifierError;
use crate::metadata::types::MetadataError;

/// Application-wide error types. Every variant renders as `{"error": message}`.
#[derive(Debug, PartialEq)]
pub enum AppError {
    // Request errors
    Validation { message: String },
    NotFound { resource: String },
    Duplicate { resource: String },
    Conflict { message: String },

    // External service errors
    Upstream { status: u16, message: String },
    MalformedResponse { message: String },

    // Database errors
    DatabaseError,
    ConnectionPoolError,

    // System errors
    Configuration { message: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation { message } => write!(f, "{}", message),
            AppError::NotFound { resource } => write!(f, "{} not found", resource),
            AppError::Duplicate { resource } => write!(f, "{} already exists", resource),
            AppError::Conflict { message } => write!(f, "{}", message),

            AppError::Upstream { message, .. } => write!(f, "{}", message),
            AppError::MalformedResponse { .. } => write!(f, "Internal server error"),

            AppError::DatabaseError => write!(f, "A database error occurred - please try again"),
            AppError::ConnectionPoolError => {
                write!(f, "Service temporarily unavailable - please try again")
            }

            AppError::Configuration { message } => write!(f, "{}", message),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        let status = match self {
            AppError::Validation { .. } | AppError::Duplicate { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Conflict { .. } => 409,
            AppError::Upstream { status, .. } => *status,
            AppError::MalformedResponse { .. }
            | AppError::DatabaseError
            | AppError::ConnectionPoolError
            | AppError::Configuration { .. } => 500,
        };
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("Server error: {:?}", self);
        } else {
            log::info!("Client error: {:?}", self);
        }

        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: &str) -> Self {
        AppError::Validation {
            message: message.to_string(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound {
            resource: resource.to_string(),
        }
    }

    pub fn duplicate(resource: &str) -> Self {
        AppError::Duplicate {
            resource: resource.to_string(),
        }
    }

    pub fn configuration(message: &str) -> Self {
        AppError::Configuration {
            message: message.to_string(),
        }
    }

    /// An external service refused the request; the caller sees its detail with a 400.
    pub fn upstream_rejected(message: impl Into<String>) -> Self {
        AppError::Upstream {
            status: 400,
            message: message.into(),
        }
    }

    /// An external service could not be reached or failed on its side.
    pub fn upstream_failed(message: impl Into<String>) -> Self {
        AppError::Upstream {
            status: 500,
            message: message.into(),
        }
    }
}

/// Convert database connection pool errors
impl From<r2d2::PoolError> for AppError {
    fn from(err: r2d2::PoolError) -> Self {
        log::error!("Database connection pool error: {}", err);
        AppError::ConnectionPoolError
    }
}

/// Convert diesel database errors
impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::NotFound => AppError::not_found("Record"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::info!("Unique constraint violated: {}", info.message());
                AppError::duplicate("Record")
            }
            _ => {
                log::error!("Database error: {}", err);
                AppError::DatabaseError
            }
        }
    }
}

/// Metadata service failures. Rejections carry the service's own detail string.
impl From<MetadataError> for AppError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::NotConfigured => AppError::configuration("YouTube API URL not configured"),
            MetadataError::Rejected { detail, .. } => AppError::upstream_rejected(detail),
            MetadataError::TranscriptUnavailable { detail } => AppError::upstream_rejected(detail),
            MetadataError::Transport(e) => {
                log::error!("Metadata service unreachable: {}", e);
                AppError::upstream_failed("Metadata service unavailable")
            }
            MetadataError::Malformed(message) => AppError::MalformedResponse { message },
        }
    }
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::NotConfigured => {
                AppError::configuration("Classification API key not configured")
            }
            ClassifierError::Upstream { status, body } => {
                log::error!("Classification endpoint returned {}: {}", status, body);
                AppError::upstream_failed("Internal server error")
            }
            ClassifierError::Transport(e) => {
                log::error!("Classification endpoint unreachable: {}", e);
                AppError::upstream_failed("Internal server error")
            }
            ClassifierError::MalformedResponse(message) => AppError::MalformedResponse { message },
        }
    }
}
