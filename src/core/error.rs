//! Typed error handling for the CleanHub backend
//!
//! Every failure surfaces to the caller as an HTTP response carrying a
//! `success: false` envelope, a machine-readable code, and a human-readable
//! message. Auth failures never reveal whether an email is registered.
//!
//! # Error Categories
//!
//! - [`AuthError`]: registration and login failures
//! - [`FilterError`]: unparsable catalog query parameters
//! - [`StoreError`]: storage backend failures
//! - [`ConfigError`]: environment configuration failures

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the CleanHub backend
///
/// Each variant contains a more specific error type for that category.
#[derive(Debug)]
pub enum ApiError {
    /// Registration / login errors
    Auth(AuthError),

    /// Catalog filter parsing errors
    Filter(FilterError),

    /// Storage backend errors
    Store(StoreError),

    /// Configuration errors
    Config(ConfigError),

    /// A product id that does not exist
    NotFound { resource: &'static str, id: String },

    /// A path segment that is not a valid identifier
    InvalidId { value: String },

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Auth(e) => write!(f, "{}", e),
            ApiError::Filter(e) => write!(f, "{}", e),
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
            ApiError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            ApiError::InvalidId { value } => write!(f, "Invalid identifier: '{}'", value),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Auth(e) => Some(e),
            ApiError::Filter(e) => Some(e),
            ApiError::Store(e) => Some(e),
            ApiError::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) => e.status_code(),
            ApiError::Filter(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => e.status_code(),
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Auth(e) => e.error_code(),
            ApiError::Filter(_) => "MALFORMED_FILTER",
            ApiError::Store(e) => e.error_code(),
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidId { .. } => "INVALID_ID",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to registration and login
#[derive(Debug)]
pub enum AuthError {
    /// An account with this email already exists
    DuplicateUser,

    /// Unknown email or wrong password
    ///
    /// Both cases map to this variant so the response shape never reveals
    /// whether the email is registered.
    InvalidCredentials,

    /// Password hashing failed
    Hashing { message: String },

    /// Token signing failed
    Token { message: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::DuplicateUser => write!(f, "User already exists"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::Hashing { message } => write!(f, "Password hashing failed: {}", message),
            AuthError::Token { message } => write!(f, "Token issuance failed: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Hashing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Token { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateUser => "USER_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Hashing { .. } => "HASHING_ERROR",
            AuthError::Token { .. } => "TOKEN_ERROR",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

// =============================================================================
// Filter Errors
// =============================================================================

/// Errors related to catalog query parameters
///
/// Malformed tokens are rejected outright rather than silently dropped, so
/// a typo in a filter never widens the result set.
#[derive(Debug, PartialEq, Eq)]
pub enum FilterError {
    /// A rating token that is not an integer
    InvalidRating { token: String },

    /// A price token that is not a `<min>-<max>` numeric range
    InvalidPriceRange { token: String },

    /// A parameter that is present but empty (e.g. `rating=`)
    EmptyParameter { parameter: &'static str },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidRating { token } => {
                write!(f, "Invalid rating token: '{}'", token)
            }
            FilterError::InvalidPriceRange { token } => {
                write!(f, "Invalid price range token: '{}'", token)
            }
            FilterError::EmptyParameter { parameter } => {
                write!(f, "Query parameter '{}' is present but empty", parameter)
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::Filter(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors related to the storage backend
#[derive(Debug)]
pub enum StoreError {
    /// A uniqueness constraint was violated
    Duplicate { field: &'static str },

    /// Query execution error
    Query { message: String },

    /// Failed to serialize/deserialize a stored document
    Serialization { message: String },

    /// Backend not reachable
    Unavailable { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate { field } => {
                write!(f, "Duplicate value for unique field '{}'", field)
            }
            StoreError::Query { message } => write!(f, "Store query error: {}", message),
            StoreError::Serialization { message } => {
                write!(f, "Store serialization error: {}", message)
            }
            StoreError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Duplicate { .. } => StatusCode::CONFLICT,
            StoreError::Query { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Duplicate { .. } => "DUPLICATE_KEY",
            StoreError::Query { .. } => "STORE_QUERY_ERROR",
            StoreError::Serialization { .. } => "STORE_SERIALIZATION_ERROR",
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to environment configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Required environment variable is not set
    MissingVariable { name: &'static str },

    /// Environment variable is set but unparsable
    InvalidValue {
        name: &'static str,
        value: String,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariable { name } => {
                write!(f, "Missing required environment variable '{}'", name)
            }
            ConfigError::InvalidValue {
                name,
                value,
                message,
            } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, name, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for CleanHub operations
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
