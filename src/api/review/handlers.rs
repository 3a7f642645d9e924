use super::extract::{ValidReview, ValidReviewId, ValidReviewPatch};
use crate::api::models::*;
use crate::storage::{NewReview, Review, ReviewPatch, StoreError};
use axum::{extract::State, http::StatusCode, Json};
use std::future::Future;
use tracing::info;

/// Run a store call on its own task so it completes even if the client
/// goes away and the handler future is dropped.
async fn detached<T, F>(op: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(op)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?
}

/// Create a new movie review
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "MovieReviews",
    request_body = NewReview,
    responses(
        (status = 201, description = "The movie review was successfully created", body = Review),
        (status = 400, description = "Invalid request body", body = ValidationErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidReview(review): ValidReview,
) -> Result<(StatusCode, Json<Review>), AppError> {
    info!(movie_title = %review.movie_title, rating = review.rating, "Creating review");

    let store = state.store.clone();
    let created = detached(async move { store.create_review(review).await }).await?;

    info!(id = %created.id, "Review created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Returns the list of all the movie reviews
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "MovieReviews",
    responses(
        (status = 200, description = "The list of the movie reviews", body = Vec<Review>),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn get_all_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let store = state.store.clone();
    let reviews = detached(async move { store.get_all_reviews().await }).await?;

    info!(count = reviews.len(), "Listed reviews");
    Ok(Json(reviews))
}

/// Get a movie review by id
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "MovieReviews",
    params(("id" = String, Path, description = "The movie review id")),
    responses(
        (status = 200, description = "The movie review", body = Review),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "The movie review was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn get_review_by_id(
    State(state): State<AppState>,
    ValidReviewId(id): ValidReviewId,
) -> Result<Json<Review>, AppError> {
    let store = state.store.clone();
    let review = detached(async move { store.get_review_by_id(&id).await })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(review))
}

/// Update a movie review by id
///
/// Only the supplied fields are overwritten.
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "MovieReviews",
    params(("id" = String, Path, description = "The movie review id")),
    request_body = ReviewPatch,
    responses(
        (status = 200, description = "The movie review was updated", body = Review),
        (status = 400, description = "Invalid id or body", body = ValidationErrorResponse),
        (status = 404, description = "The movie review was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    ValidReviewId(id): ValidReviewId,
    ValidReviewPatch(patch): ValidReviewPatch,
) -> Result<Json<Review>, AppError> {
    let store = state.store.clone();
    let review = detached(async move { store.update_review(&id, patch).await })
        .await?
        .ok_or(AppError::NotFound)?;

    info!(%id, "Review updated");
    Ok(Json(review))
}

/// Remove a movie review by id
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "MovieReviews",
    params(("id" = String, Path, description = "The movie review id")),
    responses(
        (status = 204, description = "The movie review was deleted"),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "The movie review was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    ValidReviewId(id): ValidReviewId,
) -> Result<StatusCode, AppError> {
    let store = state.store.clone();
    detached(async move { store.delete_review(&id).await })
        .await?
        .ok_or(AppError::NotFound)?;

    info!(%id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
