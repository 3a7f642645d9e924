use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{NewReview, Result, Review, ReviewId, ReviewPatch, ReviewStore};

/// Process-local review store
///
/// Reviews are kept in insertion order; lookups are linear.
#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<(ReviewId, Review)>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create_review(&self, review: NewReview) -> Result<Review> {
        review.check_schema()?;

        let id = ReviewId::generate();
        let now = Utc::now();
        let stored = Review {
            id: id.to_string(),
            movie_title: review.movie_title,
            reviewer: review.reviewer,
            rating: review.rating,
            review_text: review.review_text,
            created_at: now,
            updated_at: now,
        };

        self.reviews.write().await.push((id, stored.clone()));
        debug!(%id, "Inserted review");

        Ok(stored)
    }

    async fn get_all_reviews(&self) -> Result<Vec<Review>> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .map(|(_, review)| review.clone())
            .collect())
    }

    async fn get_review_by_id(&self, id: &ReviewId) -> Result<Option<Review>> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, review)| review.clone()))
    }

    async fn update_review(&self, id: &ReviewId, patch: ReviewPatch) -> Result<Option<Review>> {
        patch.check_schema()?;

        let mut reviews = self.reviews.write().await;
        let Some((_, review)) = reviews.iter_mut().find(|(key, _)| key == id) else {
            return Ok(None);
        };
        patch.apply(review, Utc::now());

        Ok(Some(review.clone()))
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<Option<Review>> {
        let mut reviews = self.reviews.write().await;
        let position = reviews.iter().position(|(key, _)| key == id);
        Ok(position.map(|i| reviews.remove(i).1))
    }
}
