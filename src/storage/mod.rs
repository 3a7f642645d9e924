//! Review persistence.
//!
//! Every read and write of a [`Review`] goes through the [`ReviewStore`]
//! trait. Absence is reported as `Ok(None)`, never as an error.

pub mod memory;
pub mod mongo;
pub mod review;

pub use memory::InMemoryReviewStore;
pub use mongo::MongoReviewStore;
pub use review::{NewReview, Review, ReviewId, ReviewPatch};

use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Any failure raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Schema(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Access to persisted reviews.
///
/// Implementations:
/// - `MongoReviewStore`: MongoDB collection
/// - `InMemoryReviewStore`: process-local map, for development and tests
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a new review; the store assigns the id and timestamps.
    async fn create_review(&self, review: NewReview) -> Result<Review>;

    /// All persisted reviews in store order.
    async fn get_all_reviews(&self) -> Result<Vec<Review>>;

    async fn get_review_by_id(&self, id: &ReviewId) -> Result<Option<Review>>;

    /// Merge the supplied fields into the stored review and return the result.
    async fn update_review(&self, id: &ReviewId, patch: ReviewPatch) -> Result<Option<Review>>;

    /// Remove the review, returning it as it was just before deletion.
    async fn delete_review(&self, id: &ReviewId) -> Result<Option<Review>>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Release backend resources on process exit.
    async fn shutdown(&self) {}
}
