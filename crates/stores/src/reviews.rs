//! Review store: per-service ratings and comments.
//!
//! Append-only, most recent first. There is no edit or delete path once a
//! review is submitted. Reviews keep a live service id, so deleting a
//! service silently orphans its reviews.

use std::sync::Arc;

use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Review;

/// Store owning the reviews collection.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    storage: Storage,
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl ReviewStore {
    /// Load reviews from storage, defaulting to empty.
    pub async fn load(storage: Storage) -> Result<Self> {
        let reviews = storage
            .load::<Vec<Review>>(keys::REVIEWS)
            .await?
            .unwrap_or_default();

        Ok(Self {
            storage,
            reviews: Arc::new(RwLock::new(reviews)),
        })
    }

    /// Prepend a review and persist.
    pub async fn add(&self, review: Review) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        reviews.insert(0, review);
        self.storage.save(keys::REVIEWS, &*reviews).await?;
        Ok(())
    }

    /// All reviews, most recent first.
    pub async fn list(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    /// Reviews for one service, most recent first.
    pub async fn for_service(&self, service_id: &str) -> Vec<Review> {
        self.reviews
            .read()
            .await
            .iter()
            .filter(|r| r.service_id == service_id)
            .cloned()
            .collect()
    }

    /// Star rating for one service: the mean rounded to the nearest whole
    /// star, 0 when the service has no reviews.
    pub async fn average_rating(&self, service_id: &str) -> i64 {
        let reviews = self.reviews.read().await;
        let ratings: Vec<i64> = reviews
            .iter()
            .filter(|r| r.service_id == service_id)
            .map(|r| r.rating)
            .collect();

        if ratings.is_empty() {
            return 0;
        }
        let mean = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;
        mean.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(id: &str, service_id: &str, rating: i64) -> Review {
        Review {
            id: id.to_string(),
            user_id: "u1".to_string(),
            user_name: "Alice".to_string(),
            service_id: service_id.to_string(),
            rating,
            comment: "Works great.".to_string(),
            date: Utc::now(),
        }
    }

    async fn test_reviews() -> ReviewStore {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        ReviewStore::load(storage).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let reviews = test_reviews().await;
        reviews.add(review("r1", "netflix", 5)).await.unwrap();
        reviews.add(review("r2", "netflix", 3)).await.unwrap();

        let list = reviews.list().await;
        assert_eq!(list[0].id, "r2");
    }

    #[tokio::test]
    async fn test_average_rating_rounds_to_nearest_star() {
        let reviews = test_reviews().await;
        assert_eq!(reviews.average_rating("netflix").await, 0);

        reviews.add(review("r1", "netflix", 5)).await.unwrap();
        reviews.add(review("r2", "netflix", 4)).await.unwrap();
        // Mean 4.5 rounds up to 5 stars.
        assert_eq!(reviews.average_rating("netflix").await, 5);

        reviews.add(review("r3", "spotify", 2)).await.unwrap();
        assert_eq!(reviews.average_rating("spotify").await, 2);
        // Other services don't bleed in.
        assert_eq!(reviews.average_rating("netflix").await, 5);
    }

    #[tokio::test]
    async fn test_reviews_persist_across_reload() {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();

        let reviews = ReviewStore::load(storage.clone()).await.unwrap();
        reviews.add(review("r1", "netflix", 4)).await.unwrap();

        let reloaded = ReviewStore::load(storage).await.unwrap();
        assert_eq!(reloaded.for_service("netflix").await.len(), 1);
    }
}
