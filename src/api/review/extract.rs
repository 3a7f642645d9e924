//! Extractors that run validation before a handler sees the request.

use super::validation::{validate_review, validate_review_id, validate_review_patch};
use crate::api::models::{AppError, FieldViolation};
use crate::storage::{NewReview, ReviewId, ReviewPatch};
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;

async fn json_body<S: Send + Sync>(req: Request, state: &S) -> Result<Value, AppError> {
    let Json(body) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|rejection| {
            AppError::Validation(vec![FieldViolation::new("body", rejection.body_text())])
        })?;
    Ok(body)
}

/// Validated create body
pub struct ValidReview(pub NewReview);

impl<S: Send + Sync> FromRequest<S> for ValidReview {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = json_body(req, state).await?;
        validate_review(&body).map(Self).map_err(AppError::Validation)
    }
}

/// Validated update body
pub struct ValidReviewPatch(pub ReviewPatch);

impl<S: Send + Sync> FromRequest<S> for ValidReviewPatch {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = json_body(req, state).await?;
        validate_review_patch(&body).map(Self).map_err(AppError::Validation)
    }
}

/// Validated `{id}` path segment
pub struct ValidReviewId(pub ReviewId);

impl<S: Send + Sync> FromRequestParts<S> for ValidReviewId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::Validation(vec![FieldViolation::new("id", rejection.body_text())])
            })?;
        validate_review_id(&raw).map(Self).map_err(AppError::Validation)
    }
}
