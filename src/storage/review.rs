use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::StoreError;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Store-assigned review identifier (a 24 hex digit document id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(ObjectId);

impl ReviewId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl FromStr for ReviewId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A persisted movie review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// The auto-generated id of the movie review
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    /// The title of the movie
    #[schema(example = "Inception")]
    pub movie_title: String,
    /// The name of the reviewer
    #[schema(example = "John Doe")]
    pub reviewer: String,
    /// The rating given to the movie, 1 to 5
    #[schema(example = 5)]
    pub rating: f64,
    /// The text of the review
    #[schema(example = "Great movie with mind-bending plot twists!")]
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    #[schema(example = "Inception")]
    pub movie_title: String,
    #[schema(example = "John Doe")]
    pub reviewer: String,
    #[schema(example = 5)]
    pub rating: f64,
    #[schema(example = "Great movie with mind-bending plot twists!")]
    pub review_text: String,
}

/// Partial update: only the fields that are `Some` get overwritten
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl ReviewPatch {
    pub fn is_empty(&self) -> bool {
        self.movie_title.is_none()
            && self.reviewer.is_none()
            && self.rating.is_none()
            && self.review_text.is_none()
    }

    /// Overwrite the supplied fields of `review` and refresh `updated_at`.
    pub fn apply(&self, review: &mut Review, now: DateTime<Utc>) {
        if let Some(title) = &self.movie_title {
            review.movie_title = title.clone();
        }
        if let Some(reviewer) = &self.reviewer {
            review.reviewer = reviewer.clone();
        }
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(text) = &self.review_text {
            review.review_text = text.clone();
        }
        review.updated_at = now;
    }
}

// Persisted-schema rules, checked by every backend before a write.

fn check_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Schema(format!("Path `{}` is required.", field)));
    }
    Ok(())
}

fn check_rating(value: f64) -> Result<(), StoreError> {
    if !value.is_finite() {
        return Err(StoreError::Schema(format!(
            "Cast to Number failed for value \"{}\" (type number) at path \"rating\"",
            value
        )));
    }
    if value < MIN_RATING {
        return Err(StoreError::Schema(format!(
            "Path `rating` ({}) is less than minimum allowed value ({}).",
            value, MIN_RATING
        )));
    }
    if value > MAX_RATING {
        return Err(StoreError::Schema(format!(
            "Path `rating` ({}) is more than maximum allowed value ({}).",
            value, MAX_RATING
        )));
    }
    Ok(())
}

impl NewReview {
    pub fn check_schema(&self) -> Result<(), StoreError> {
        check_text("movieTitle", &self.movie_title)?;
        check_text("reviewer", &self.reviewer)?;
        check_rating(self.rating)?;
        check_text("reviewText", &self.review_text)
    }
}

impl ReviewPatch {
    pub fn check_schema(&self) -> Result<(), StoreError> {
        if let Some(title) = &self.movie_title {
            check_text("movieTitle", title)?;
        }
        if let Some(reviewer) = &self.reviewer {
            check_text("reviewer", reviewer)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(text) = &self.review_text {
            check_text("reviewText", text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_review(rating: f64) -> NewReview {
        NewReview {
            movie_title: "Inception".to_string(),
            reviewer: "John Doe".to_string(),
            rating,
            review_text: "Great movie!".to_string(),
        }
    }

    #[test]
    fn test_schema_rating_bounds() {
        assert!(new_review(0.0).check_schema().is_err());
        assert!(new_review(1.0).check_schema().is_ok());
        assert!(new_review(5.0).check_schema().is_ok());
        assert!(new_review(6.0).check_schema().is_err());
        assert!(new_review(f64::NAN).check_schema().is_err());
    }

    #[test]
    fn test_schema_rejects_blank_text() {
        let mut review = new_review(3.0);
        review.reviewer = "   ".to_string();
        let err = review.check_schema().unwrap_err();
        assert_eq!(err.to_string(), "Path `reviewer` is required.");
    }

    #[test]
    fn test_patch_only_checks_supplied_fields() {
        assert!(ReviewPatch::default().check_schema().is_ok());

        let patch = ReviewPatch {
            rating: Some(6.0),
            ..Default::default()
        };
        assert!(patch.check_schema().is_err());
    }

    #[test]
    fn test_review_id_round_trips_through_hex() {
        let id = ReviewId::generate();
        let parsed: ReviewId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("123".parse::<ReviewId>().is_err());
    }
}
