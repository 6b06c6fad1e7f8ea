//! Typed error handling for the catalog
//!
//! Every failure a service call or a request handler can produce is a
//! [`CatalogError`], which knows its HTTP status code, a stable error code,
//! and how to render itself as a response.
//!
//! # Error Categories
//!
//! - [`CatalogError::InvalidArgument`]: bad or missing identifiers or payload
//! - [`CatalogError::NotFound`]: the referenced entity does not exist
//! - [`StorageError`]: failures of the persistence backend
//! - [`RequestError`]: malformed HTTP input rejected before the service
//!
//! # Example
//!
//! ```rust,ignore
//! match stores.get_by_id(id).await {
//!     Ok(store) => println!("Found: {:?}", store),
//!     Err(CatalogError::NotFound { id, .. }) => println!("Store {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::Entity;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// The main error type of the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An identifier or payload was missing or malformed
    #[error("{message}")]
    InvalidArgument {
        argument: String,
        message: String,
        fields: Vec<FieldViolation>,
    },

    /// The referenced entity does not exist
    #[error("{entity_type} not found.")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Malformed HTTP input
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Invalid argument without field details
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Invalid argument built from `validator` failures
    pub fn invalid_fields(
        argument: impl Into<String>,
        message: impl Into<String>,
        errors: &ValidationErrors,
    ) -> Self {
        CatalogError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
            fields: flatten_violations("", errors),
        }
    }

    /// Not-found error for an entity type
    pub fn not_found<T: Entity>(id: Uuid) -> Self {
        CatalogError::NotFound {
            entity_type: T::display_name(),
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CatalogError::InvalidArgument { .. })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Storage(e) => e.status_code(),
            CatalogError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Storage(e) => e.error_code(),
            CatalogError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::InvalidArgument {
                argument, fields, ..
            } if !fields.is_empty() => Some(serde_json::json!({
                "argument": argument,
                "fields": fields
            })),
            CatalogError::InvalidArgument { argument, .. } => {
                Some(serde_json::json!({ "argument": argument }))
            }
            CatalogError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id.to_string()
            })),
            _ => None,
        }
    }
}

/// Not-found failures answer with their message as a plain-text body;
/// everything else answers with a JSON [`ErrorResponse`].
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }

        match self {
            CatalogError::NotFound { .. } => (status, self.to_string()).into_response(),
            _ => (status, Json(self.to_response())).into_response(),
        }
    }
}

/// Flatten nested `validator` errors into dotted field paths
fn flatten_violations(prefix: &str, errors: &ValidationErrors) -> Vec<FieldViolation> {
    use validator::ValidationErrorsKind;

    let mut violations = Vec::new();
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                violations.extend(errs.iter().map(|e| FieldViolation {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => {
                violations.extend(flatten_violations(&path, inner));
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    violations.extend(flatten_violations(&format!("{}[{}]", path, index), inner));
                }
            }
        }
    }
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Transaction error
    #[error("Transaction error: {message}")]
    TransactionError { message: String },

    /// Data integrity error (key or reference constraint)
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::TransactionError { .. } => "STORAGE_TRANSACTION_ERROR",
            StorageError::IntegrityError { .. } => "STORAGE_INTEGRITY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        StorageError::IntegrityError {
            message: message.into(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid entity ID format
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },

    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Request body is empty
    #[error("Request body is required")]
    MissingBody,

    /// A required field is absent from the body
    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::MissingBody => "MISSING_BODY",
            RequestError::MissingField { .. } => "MISSING_FIELD",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type aliases
// =============================================================================

/// A specialized Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A specialized Result type for storage backends
pub type StorageResult<T> = Result<T, StorageError>;
