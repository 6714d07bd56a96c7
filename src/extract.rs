//! `Json` and `Query` wrappers whose rejections go through [`ApiError`].
//!
//! axum's own rejections answer with plain-text bodies that name serde fields
//! and byte positions. These wrappers keep the error envelope and a short
//! fixed message; the detailed text is only logged.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(ApiJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    debug!(reason = %rejection.body_text(), "json body rejected");
    match rejection {
        JsonRejection::JsonDataError(_) => ApiError::Unprocessable("Invalid request body".into()),
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::Validation("Expected a JSON request body".into())
        }
        _ => ApiError::Validation("Malformed request body".into()),
    }
}

pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(ApiQuery(value))
    }
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    debug!(reason = %rejection.body_text(), "query string rejected");
    ApiError::Validation("Invalid query parameters".into())
}
