//! Request validation for review routes.
//!
//! Bodies are inspected as raw JSON so every bad field is reported at once,
//! in a fixed field order, before being turned into typed requests.

use crate::api::models::FieldViolation;
use crate::storage::review::{MAX_RATING, MIN_RATING};
use crate::storage::{NewReview, ReviewId, ReviewPatch};
use serde_json::{Map, Value};

struct TextField {
    key: &'static str,
    label: &'static str,
}

const MOVIE_TITLE: TextField = TextField {
    key: "movieTitle",
    label: "Movie title",
};
const REVIEWER: TextField = TextField {
    key: "reviewer",
    label: "Reviewer",
};
const REVIEW_TEXT: TextField = TextField {
    key: "reviewText",
    label: "Review text",
};
const RATING: &str = "rating";

fn text(
    body: &Map<String, Value>,
    field: &TextField,
    required: bool,
    errors: &mut Vec<FieldViolation>,
) -> Option<String> {
    match body.get(field.key) {
        None if !required => None,
        None | Some(Value::Null) => {
            errors.push(FieldViolation::new(field.key, format!("{} is required", field.label)));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(FieldViolation::new(field.key, format!("{} is required", field.label)));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldViolation::new(
                field.key,
                format!("{} must be a string", field.label),
            ));
            None
        }
    }
}

fn rating(body: &Map<String, Value>, required: bool, errors: &mut Vec<FieldViolation>) -> Option<f64> {
    match body.get(RATING) {
        None if !required => None,
        None | Some(Value::Null) => {
            errors.push(FieldViolation::new(RATING, "Rating is required"));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Some(r),
            _ => {
                errors.push(FieldViolation::new(RATING, "Rating must be between 1 and 5"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldViolation::new(RATING, "Rating must be a number"));
            None
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldViolation>> {
    body.as_object()
        .ok_or_else(|| vec![FieldViolation::new("body", "Request body must be a JSON object")])
}

/// Validate a create body; all four content fields are required.
pub fn validate_review(body: &Value) -> Result<NewReview, Vec<FieldViolation>> {
    let body = as_object(body)?;
    let mut errors = Vec::new();

    let movie_title = text(body, &MOVIE_TITLE, true, &mut errors);
    let reviewer = text(body, &REVIEWER, true, &mut errors);
    let rating = rating(body, true, &mut errors);
    let review_text = text(body, &REVIEW_TEXT, true, &mut errors);

    match (movie_title, reviewer, rating, review_text) {
        (Some(movie_title), Some(reviewer), Some(rating), Some(review_text)) if errors.is_empty() => {
            Ok(NewReview {
                movie_title,
                reviewer,
                rating,
                review_text,
            })
        }
        _ => Err(errors),
    }
}

/// Validate an update body; only the fields present are checked.
pub fn validate_review_patch(body: &Value) -> Result<ReviewPatch, Vec<FieldViolation>> {
    let body = as_object(body)?;
    let mut errors = Vec::new();

    let patch = ReviewPatch {
        movie_title: text(body, &MOVIE_TITLE, false, &mut errors),
        reviewer: text(body, &REVIEWER, false, &mut errors),
        rating: rating(body, false, &mut errors),
        review_text: text(body, &REVIEW_TEXT, false, &mut errors),
    };

    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

/// Validate a path id against the document id format.
pub fn validate_review_id(raw: &str) -> Result<ReviewId, Vec<FieldViolation>> {
    raw.parse()
        .map_err(|_| vec![FieldViolation::new("id", "Invalid review ID")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(errors: &[FieldViolation]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_review_passes() {
        let review = validate_review(&json!({
            "movieTitle": "Inception",
            "reviewer": "John Doe",
            "rating": 5,
            "reviewText": "Great movie!"
        }))
        .unwrap();

        assert_eq!(review.movie_title, "Inception");
        assert_eq!(review.rating, 5.0);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let errors = validate_review(&json!({})).unwrap_err();

        assert_eq!(fields(&errors), vec!["movieTitle", "reviewer", "rating", "reviewText"]);
        assert_eq!(errors[0].message, "Movie title is required");
        assert_eq!(errors[2].message, "Rating is required");
    }

    #[test]
    fn test_wrong_types_rejected() {
        let errors = validate_review(&json!({
            "movieTitle": 42,
            "reviewer": "John Doe",
            "rating": "five",
            "reviewText": ["Great"]
        }))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldViolation::new("movieTitle", "Movie title must be a string"),
                FieldViolation::new("rating", "Rating must be a number"),
                FieldViolation::new("reviewText", "Review text must be a string"),
            ]
        );
    }

    #[test]
    fn test_blank_text_is_missing() {
        let errors = validate_review(&json!({
            "movieTitle": "Inception",
            "reviewer": "  ",
            "rating": 3,
            "reviewText": "Fine"
        }))
        .unwrap_err();

        assert_eq!(errors, vec![FieldViolation::new("reviewer", "Reviewer is required")]);
    }

    #[test]
    fn test_rating_bounds() {
        for (rating, ok) in [(0.0, false), (1.0, true), (5.0, true), (6.0, false), (9.0, false)] {
            let result = validate_review(&json!({
                "movieTitle": "Inception",
                "reviewer": "John Doe",
                "rating": rating,
                "reviewText": "Great movie!"
            }));
            assert_eq!(result.is_ok(), ok, "rating {}", rating);
        }
    }

    #[test]
    fn test_non_object_body_rejected() {
        let errors = validate_review(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(fields(&errors), vec!["body"]);

        let errors = validate_review_patch(&json!("text")).unwrap_err();
        assert_eq!(fields(&errors), vec!["body"]);
    }

    #[test]
    fn test_patch_checks_only_present_fields() {
        let patch = validate_review_patch(&json!({ "reviewText": "Amazing movie!" })).unwrap();
        assert_eq!(
            patch,
            ReviewPatch {
                review_text: Some("Amazing movie!".to_string()),
                ..Default::default()
            }
        );

        assert!(validate_review_patch(&json!({})).unwrap().is_empty());

        let errors = validate_review_patch(&json!({ "rating": 6, "reviewer": null })).unwrap_err();
        assert_eq!(fields(&errors), vec!["reviewer", "rating"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let patch = validate_review_patch(&json!({ "title": "x", "content": "y" })).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_review_id_format() {
        assert!(validate_review_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());

        let errors = validate_review_id("123").unwrap_err();
        assert_eq!(errors, vec![FieldViolation::new("id", "Invalid review ID")]);
    }
}
