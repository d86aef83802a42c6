//! # Review Repository
//!
//! Customer reviews, kept per product in insertion order.

use std::sync::Arc;

use chrono::Utc;
use cheapware_core::reviews::{self, ReviewSummary};
use cheapware_core::{NewReview, Review, VoteKind};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct ReviewBook {
    reviews: Vec<Review>,
    last_id: u64,
}

/// Repository for product reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewRepository {
    inner: Arc<RwLock<ReviewBook>>,
}

impl ReviewRepository {
    pub fn new(reviews: Vec<Review>) -> Self {
        let last_id = reviews.iter().map(|r| r.id).max().unwrap_or(0);
        ReviewRepository {
            inner: Arc::new(RwLock::new(ReviewBook { reviews, last_id })),
        }
    }

    /// Reviews for one product.
    pub async fn list(&self, product_id: u64) -> Vec<Review> {
        debug!(product_id, "Listing reviews");
        self.inner
            .read()
            .await
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect()
    }

    /// Reviews for one product plus their star breakdown.
    pub async fn list_with_summary(&self, product_id: u64) -> (Vec<Review>, ReviewSummary) {
        let list = self.list(product_id).await;
        let summary = reviews::summarize(&list);
        (list, summary)
    }

    /// Stores a new review.
    ///
    /// The caller checks that the product exists.
    pub async fn add(&self, product_id: u64, new_review: NewReview) -> StoreResult<Review> {
        new_review.validate()?;

        let mut book = self.inner.write().await;
        let id = book.last_id + 1;
        let review = new_review.into_review(id, product_id, Utc::now())?;

        book.last_id = id;
        book.reviews.push(review.clone());

        info!(id, product_id, rating = review.rating, "Review added");
        Ok(review)
    }

    /// Counts a helpful / unhelpful click.
    pub async fn vote(&self, review_id: u64, kind: VoteKind) -> StoreResult<Review> {
        let mut book = self.inner.write().await;
        let review = book
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or_else(|| StoreError::not_found("Review", review_id))?;

        review.vote(kind);
        debug!(review_id, ?kind, "Review vote recorded");
        Ok(review.clone())
    }

    /// Drops every review of a deleted product. Returns how many went.
    pub async fn remove_for_product(&self, product_id: u64) -> usize {
        let mut book = self.inner.write().await;
        let before = book.reviews.len();
        book.reviews.retain(|r| r.product_id != product_id);
        let removed = before - book.reviews.len();

        if removed > 0 {
            info!(product_id, removed, "Reviews removed with product");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn new_review(rating: u8) -> NewReview {
        NewReview {
            author: Some("Alex".to_string()),
            rating,
            title: "Solid".to_string(),
            content: "Boils water fast".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_and_summary() {
        let repo = ReviewRepository::new(seed::default_reviews());
        assert_eq!(repo.list(1).await.len(), 3);
        assert!(repo.list(2).await.is_empty());

        let (list, summary) = repo.list_with_summary(1).await;
        assert_eq!(list.len(), 3);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.distribution, [0, 0, 0, 1, 2]);
    }

    #[tokio::test]
    async fn test_add_assigns_ids() {
        let repo = ReviewRepository::new(seed::default_reviews());
        let review = repo.add(4, new_review(4)).await.unwrap();
        assert_eq!(review.id, 4);
        assert_eq!(review.product_id, 4);
        assert_eq!(repo.list(4).await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_rating() {
        let repo = ReviewRepository::default();
        assert!(repo.add(1, new_review(6)).await.is_err());
        assert!(repo.list(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_vote() {
        let repo = ReviewRepository::new(seed::default_reviews());
        let review = repo.vote(1, VoteKind::Helpful).await.unwrap();
        assert_eq!(review.helpful, 25);

        let review = repo.vote(1, VoteKind::Unhelpful).await.unwrap();
        assert_eq!(review.unhelpful, 3);

        assert!(matches!(
            repo.vote(99, VoteKind::Helpful).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_for_product() {
        let repo = ReviewRepository::new(seed::default_reviews());
        repo.add(2, new_review(5)).await.unwrap();

        assert_eq!(repo.remove_for_product(1).await, 3);
        assert_eq!(repo.remove_for_product(1).await, 0);
        assert_eq!(repo.list(2).await.len(), 1);
    }
}
