//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It covers both the authentication/authorization outcomes (duplicate email, bad
//! credentials, rejected tokens, forbidden access) and the generic failures of the
//! surrounding CRUD layer (not found, validation, database).
//!
//! `AppError` implements `actix_web::error::ResponseError` so every variant renders as a
//! JSON body of the form `{ "error": "...", "code": "..." }` with a matching status.
//! Infrastructure failures are rendered with a generic message; their detail is logged.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration or update tried to use an email that already belongs to an account (HTTP 409).
    DuplicateEmail,
    /// Login failed. Unknown email and wrong password both map here (HTTP 401).
    InvalidCredentials,
    /// A token failed verification: expired, malformed or signed with another key (HTTP 401).
    InvalidToken,
    /// A protected route was called without a usable access token (HTTP 401).
    Unauthenticated(String),
    /// The caller is authenticated but its role or ownership does not allow the operation (HTTP 403).
    Forbidden(String),
    /// Represents a client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// Represents an error due to failed input validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// Represents an error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// Stable machine-readable identifier included in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "duplicate_email",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::ValidationError(_) => "validation_error",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    /// Message safe to return to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::DuplicateEmail => "Email already registered".into(),
            AppError::InvalidCredentials => "Invalid email or password".into(),
            AppError::InvalidToken => "Invalid token".into(),
            AppError::Unauthenticated(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                "Internal server error".into()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Conflict: email already registered"),
            AppError::InvalidCredentials => write!(f, "Unauthorized: invalid credentials"),
            AppError::InvalidToken => write!(f, "Unauthorized: invalid token"),
            AppError::Unauthenticated(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::DatabaseError(_) | AppError::InternalServerError(_) = self {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message(),
            "code": self.code(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound` and a unique-constraint violation becomes
/// `DuplicateEmail` (the only unique constraint in the schema is on `users.email`).
/// A foreign-key violation means the referenced task or account is gone: `NotFound`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateEmail
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Referenced record not found".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any JWT processing failure collapses into `InvalidToken`; the cause is not surfaced.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken
    }
}

/// Hashing failures are infrastructure errors, never authentication failures.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
