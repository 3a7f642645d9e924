use crate::api::models::AppState;
use crate::api::review::handlers::{
    create_review, delete_review, get_all_reviews, get_review_by_id, update_review,
};
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(get_all_reviews).post(create_review))
        .route(
            "/reviews/{id}",
            get(get_review_by_id).put(update_review).delete(delete_review),
        )
}
