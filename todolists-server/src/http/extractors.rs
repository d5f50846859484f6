//! Custom Axum extractors
//!
//! Path ids are checked before any store call and before the body is read.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{parse_id, validate_ids, ValidationError};

fn object_id(raw: &str) -> Result<ObjectId, ApiError> {
    parse_id(raw).ok_or(ApiError::InvalidIdentifier)
}

/// Extract and validate `{list_id}`
pub struct ListId(pub ObjectId);

impl<S> FromRequestParts<S> for ListId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(list_id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidIdentifier)?;

        if !validate_ids(&[list_id.as_str()]) {
            return Err(ApiError::InvalidIdentifier);
        }
        Ok(Self(object_id(&list_id)?))
    }
}

/// Extract and validate `{list_id}` and `{item_id}` together
pub struct ListItemIds {
    pub list_id: ObjectId,
    pub item_id: ObjectId,
}

impl<S> FromRequestParts<S> for ListItemIds
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((list_id, item_id)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InvalidIdentifier)?;

        if !validate_ids(&[list_id.as_str(), item_id.as_str()]) {
            return Err(ApiError::InvalidIdentifier);
        }
        Ok(Self {
            list_id: object_id(&list_id)?,
            item_id: object_id(&item_id)?,
        })
    }
}

/// JSON body whose rejections are reported as validation errors (400)
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })
        })?;
        Ok(Self(value))
    }
}
