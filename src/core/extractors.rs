//! Axum extractors shared by both front ends
//!
//! - [`EntityId`] parses a single path segment into a UUID
//! - [`OptionalJson`] reads a JSON body that may be absent

use crate::core::error::{CatalogError, RequestError};
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A UUID taken from the single path parameter of a route.
///
/// A segment that does not parse answers 400 with `INVALID_ENTITY_ID`
/// instead of axum's plain-text path rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Parse a raw path segment
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        raw.trim()
            .parse::<Uuid>()
            .map(EntityId)
            .map_err(|_| RequestError::InvalidEntityId {
                id: raw.to_string(),
            })
    }
}

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidEntityId { id: e.body_text() })?;

        Ok(EntityId::parse(&raw)?)
    }
}

/// JSON body that may be missing.
///
/// An empty body (or a literal `null`) yields `OptionalJson(None)` so the
/// service can report the absent payload itself. Malformed JSON is rejected
/// with `INVALID_BODY`. The `Content-Type` header is not checked.
#[derive(Debug, Clone)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T> OptionalJson<T>
where
    T: DeserializeOwned,
{
    /// Decode raw body bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RequestError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }

        serde_json::from_slice::<Option<T>>(bytes)
            .map(OptionalJson)
            .map_err(|e| RequestError::InvalidBody {
                message: e.to_string(),
            })
    }
}

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        Ok(OptionalJson::from_bytes(&bytes)?)
    }
}
