//! Review math for the product detail page: the star summary, new review
//! validation and helpful votes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{NewReview, Review, VoteKind};
use crate::validation;

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Star breakdown shown above the review list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewSummary {
    pub count: usize,
    /// Mean rating rounded to one decimal, 0.0 with no reviews.
    pub average: f32,
    /// `distribution[0]` counts 1-star reviews, `distribution[4]` 5-star.
    pub distribution: [usize; 5],
}

pub fn summarize(reviews: &[Review]) -> ReviewSummary {
    let mut distribution = [0usize; 5];
    let mut total: u32 = 0;

    for review in reviews {
        if let Some(bucket) = distribution.get_mut(usize::from(review.rating.clamp(1, 5)) - 1) {
            *bucket += 1;
        }
        total += u32::from(review.rating);
    }

    let average = if reviews.is_empty() {
        0.0
    } else {
        // tenths, rounded half up
        let tenths = (total * 20 + reviews.len() as u32) / (reviews.len() as u32 * 2);
        tenths as f32 / 10.0
    };

    ReviewSummary {
        count: reviews.len(),
        average,
        distribution,
    }
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_review_rating(self.rating)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::required("title"));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::required("content"));
        }
        if self.title.chars().count() > 200 {
            return Err(ValidationError::TooLong {
                field: "title".to_string(),
                max: 200,
            });
        }
        Ok(())
    }

    pub fn into_review(self, id: u64, product_id: u64, now: DateTime<Utc>) -> Result<Review, ValidationError> {
        self.validate()?;

        let author = self
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

        Ok(Review {
            id,
            product_id,
            author,
            rating: self.rating,
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            helpful: 0,
            unhelpful: 0,
            created_at: now,
        })
    }
}

impl Review {
    pub fn vote(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Helpful => self.helpful = self.helpful.saturating_add(1),
            VoteKind::Unhelpful => self.unhelpful = self.unhelpful.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: u64, rating: u8) -> Review {
        NewReview {
            author: Some("Sarah Johnson".to_string()),
            rating,
            title: "Great".to_string(),
            content: "Works well".to_string(),
        }
        .into_review(id, 1, Utc::now())
        .unwrap()
    }

    #[test]
    fn test_summary() {
        let reviews = vec![review(1, 5), review(2, 4), review(3, 5)];
        let summary = summarize(&reviews);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.7);
        assert_eq!(summary.distribution, [0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn test_new_review_defaults_author() {
        let review = NewReview {
            author: Some("  ".to_string()),
            rating: 3,
            title: "Okay".to_string(),
            content: "Does the job".to_string(),
        }
        .into_review(7, 2, Utc::now())
        .unwrap();
        assert_eq!(review.author, ANONYMOUS_AUTHOR);
        assert_eq!(review.product_id, 2);
        assert_eq!(review.helpful, 0);
    }

    #[test]
    fn test_new_review_validation() {
        let base = NewReview {
            author: None,
            rating: 5,
            title: "Title".to_string(),
            content: "Body".to_string(),
        };
        assert!(base.validate().is_ok());

        let bad_rating = NewReview { rating: 0, ..base.clone() };
        assert!(bad_rating.validate().is_err());

        let no_title = NewReview {
            title: String::new(),
            ..base.clone()
        };
        assert!(no_title.validate().is_err());

        let no_content = NewReview {
            content: " ".to_string(),
            ..base
        };
        assert!(no_content.validate().is_err());
    }

    #[test]
    fn test_votes() {
        let mut review = review(1, 5);
        review.vote(VoteKind::Helpful);
        review.vote(VoteKind::Helpful);
        review.vote(VoteKind::Unhelpful);
        assert_eq!((review.helpful, review.unhelpful), (2, 1));
    }
}
