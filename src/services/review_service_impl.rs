//! `SeaORM` implementation of the `ReviewService` trait.

use async_trait::async_trait;

use crate::config::ReviewConfig;
use crate::db::{ReviewWrite, Store};
use crate::models::review::{ReviewStats, normalize_review_text, validate_rating};
use crate::services::review_service::{
    HeroReview, HeroReviewPage, Pagination, Review, ReviewChanges, ReviewError, ReviewService,
    ReviewSubmission, SubmittedReview, UserReview,
};

const NOT_FOUND_OR_NOT_OWNED: &str = "Review not found or you don't have permission";

pub struct SeaOrmReviewService {
    store: Store,
    config: ReviewConfig,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Store, config: ReviewConfig) -> Self {
        Self { store, config }
    }

    fn page_bounds(&self, limit: Option<u64>, offset: Option<u64>) -> Result<(u64, u64), ReviewError> {
        let limit = limit.unwrap_or(self.config.default_page_size);
        if limit == 0 || limit > self.config.max_page_size {
            return Err(ReviewError::Validation(format!(
                "limit must be between 1 and {}",
                self.config.max_page_size
            )));
        }
        let offset = offset.unwrap_or(0);
        if i64::try_from(offset).is_err() {
            return Err(ReviewError::Validation(format!(
                "offset must be at most {}",
                i64::MAX
            )));
        }
        Ok((limit, offset))
    }
}

#[async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn submit_review(
        &self,
        submission: ReviewSubmission,
    ) -> Result<SubmittedReview, ReviewError> {
        let rating = validate_rating(submission.rating).map_err(ReviewError::Validation)?;
        let text =
            normalize_review_text(&submission.review_text).map_err(ReviewError::Validation)?;

        match self
            .store
            .upsert_review(&submission.hero_id, &submission.user_id, rating, &text)
            .await?
        {
            ReviewWrite::Created(model) => Ok(SubmittedReview {
                review: Review::from(model),
                is_update: false,
            }),
            ReviewWrite::Updated(model) => Ok(SubmittedReview {
                review: Review::from(model),
                is_update: true,
            }),
            ReviewWrite::MissingHero => Err(ReviewError::NotFound("Hero not found".to_string())),
            ReviewWrite::MissingUser => Err(ReviewError::NotFound("User not found".to_string())),
        }
    }

    async fn list_reviews_for_hero(
        &self,
        hero_id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<HeroReviewPage, ReviewError> {
        let (limit, offset) = self.page_bounds(limit, offset)?;

        if self.store.get_hero(hero_id).await?.is_none() {
            return Err(ReviewError::NotFound("Hero not found".to_string()));
        }

        let reviews = self
            .store
            .list_reviews_for_hero(hero_id, limit, offset)
            .await?
            .into_iter()
            .map(|(review, author)| HeroReview::new(review, author))
            .collect::<Vec<_>>();

        let stats = ReviewStats::from_counts(&self.store.review_rating_counts(hero_id).await?);
        let total = self.store.count_reviews_for_hero(hero_id).await?;

        Ok(HeroReviewPage {
            pagination: Pagination {
                limit,
                offset,
                total,
                has_more: offset.saturating_add(reviews.len() as u64) < total,
            },
            reviews,
            stats,
        })
    }

    async fn update_review(
        &self,
        review_id: &str,
        user_id: &str,
        changes: ReviewChanges,
    ) -> Result<Review, ReviewError> {
        if changes.rating.is_none() && changes.review_text.is_none() {
            return Err(ReviewError::Validation(
                "Provide a rating or review text to update".to_string(),
            ));
        }

        let rating = changes
            .rating
            .map(validate_rating)
            .transpose()
            .map_err(ReviewError::Validation)?;
        let text = changes
            .review_text
            .as_deref()
            .map(normalize_review_text)
            .transpose()
            .map_err(ReviewError::Validation)?;

        let model = self
            .store
            .update_owned_review(review_id, user_id, rating, text.as_deref())
            .await?
            .ok_or_else(|| ReviewError::NotFound(NOT_FOUND_OR_NOT_OWNED.to_string()))?;

        Ok(Review::from(model))
    }

    async fn delete_review(&self, review_id: &str, user_id: &str) -> Result<(), ReviewError> {
        if self.store.delete_owned_review(review_id, user_id).await? {
            Ok(())
        } else {
            Err(ReviewError::NotFound(NOT_FOUND_OR_NOT_OWNED.to_string()))
        }
    }

    async fn list_user_reviews(&self, user_id: &str) -> Result<Vec<UserReview>, ReviewError> {
        Ok(self
            .store
            .list_reviews_for_user(user_id)
            .await?
            .into_iter()
            .map(|(review, hero)| UserReview::new(review, hero))
            .collect())
    }
}
