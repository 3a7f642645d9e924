//! OpenAPI document and Swagger UI.

use crate::api::models::{AppState, ErrorResponse, FieldViolation, ValidationErrorResponse};
use crate::api::review::handlers;
use crate::storage::{NewReview, Review, ReviewPatch};
use axum::Router;
use utoipa::openapi::{OpenApi as OpenApiDoc, ServerBuilder};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/api-docs";
pub const SPEC_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Review API",
        version = "1.0.0",
        description = "API for managing movie reviews"
    ),
    paths(
        handlers::create_review,
        handlers::get_all_reviews,
        handlers::get_review_by_id,
        handlers::update_review,
        handlers::delete_review,
    ),
    components(schemas(
        Review,
        NewReview,
        ReviewPatch,
        FieldViolation,
        ValidationErrorResponse,
        ErrorResponse
    )),
    tags((name = "MovieReviews", description = "The movie reviews managing API"))
)]
pub struct ApiDoc;

/// Build the OpenAPI document with review paths served under `base_path`.
pub fn openapi(base_path: &str) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    let url = if base_path.is_empty() { "/" } else { base_path };
    doc.servers = Some(vec![ServerBuilder::new().url(url).build()]);
    doc
}

pub fn routes(base_path: &str) -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(SPEC_PATH, openapi(base_path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_review_paths() {
        let doc = openapi("/api");

        assert_eq!(doc.info.title, "Movie Review API");
        assert!(doc.paths.paths.contains_key("/reviews"));
        assert!(doc.paths.paths.contains_key("/reviews/{id}"));
        assert_eq!(doc.servers.unwrap()[0].url, "/api");
    }
}
