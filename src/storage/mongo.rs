//! MongoDB implementation of [`ReviewStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{NewReview, Result, Review, ReviewId, ReviewPatch, ReviewStore, StoreError};

/// Stored shape of a review
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    movie_title: String,
    reviewer: String,
    rating: f64,
    review_text: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_chrono(ts: bson::DateTime) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).ok_or_else(|| {
        StoreError::Backend(format!("Invalid stored timestamp: {}", ts.timestamp_millis()))
    })
}

impl TryFrom<ReviewDocument> for Review {
    type Error = StoreError;

    fn try_from(doc: ReviewDocument) -> Result<Self> {
        Ok(Review {
            id: doc.id.to_hex(),
            movie_title: doc.movie_title,
            reviewer: doc.reviewer,
            rating: doc.rating,
            review_text: doc.review_text,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}

/// Build the `$set` body for a partial update.
fn set_fields(patch: &ReviewPatch, now: bson::DateTime) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.movie_title {
        set.insert("movieTitle", title.as_str());
    }
    if let Some(reviewer) = &patch.reviewer {
        set.insert("reviewer", reviewer.as_str());
    }
    if let Some(rating) = patch.rating {
        set.insert("rating", rating);
    }
    if let Some(text) = &patch.review_text {
        set.insert("reviewText", text.as_str());
    }
    set.insert("updatedAt", now);
    set
}

/// MongoDB review store
pub struct MongoReviewStore {
    client: Client,
    database: Database,
    reviews: Collection<ReviewDocument>,
}

impl MongoReviewStore {
    /// Connect and verify the server answers a `ping`.
    pub async fn connect(uri: &str, database_name: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let store = Self::new(client, database_name, collection);
        store.ping().await?;

        info!(database = database_name, collection, "Connected to MongoDB");
        Ok(store)
    }

    pub fn new(client: Client, database_name: &str, collection: &str) -> Self {
        let database = client.database(database_name);
        let reviews = database.collection(collection);
        Self {
            client,
            database,
            reviews,
        }
    }

    /// Untyped handle on the review collection.
    pub fn raw_collection(&self) -> Collection<Document> {
        self.reviews.clone_with_type()
    }
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn create_review(&self, review: NewReview) -> Result<Review> {
        review.check_schema()?;

        let now = bson::DateTime::now();
        let doc = ReviewDocument {
            id: ObjectId::new(),
            movie_title: review.movie_title,
            reviewer: review.reviewer,
            rating: review.rating,
            review_text: review.review_text,
            created_at: now,
            updated_at: now,
        };

        self.reviews.insert_one(&doc).await?;
        debug!(id = %doc.id, "Inserted review document");

        doc.try_into()
    }

    async fn get_all_reviews(&self) -> Result<Vec<Review>> {
        let docs: Vec<ReviewDocument> = self.reviews.find(doc! {}).await?.try_collect().await?;
        docs.into_iter().map(Review::try_from).collect()
    }

    async fn get_review_by_id(&self, id: &ReviewId) -> Result<Option<Review>> {
        self.reviews
            .find_one(doc! { "_id": id.object_id() })
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn update_review(&self, id: &ReviewId, patch: ReviewPatch) -> Result<Option<Review>> {
        patch.check_schema()?;

        let update = doc! { "$set": set_fields(&patch, bson::DateTime::now()) };
        self.reviews
            .find_one_and_update(doc! { "_id": id.object_id() }, update)
            .return_document(ReturnDocument::After)
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<Option<Review>> {
        self.reviews
            .find_one_and_delete(doc! { "_id": id.object_id() })
            .await?
            .map(Review::try_from)
            .transpose()
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }
}
