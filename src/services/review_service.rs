//! Domain service for hero reviews.
//!
//! One review per (hero, user); submissions upsert, mutations are owner-only.

use serde::Serialize;
use thiserror::Error;

use crate::entities::{heroes, reviews, users};
use crate::models::review::ReviewStats;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: String,
    pub hero_id: String,
    pub user_id: String,
    pub rating: i32,
    pub review_text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            hero_id: model.hero_id,
            user_id: model.user_id,
            rating: model.rating,
            review_text: model.review_text,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A review as listed under its hero, with the author's public name.
#[derive(Debug, Clone, Serialize)]
pub struct HeroReview {
    #[serde(flatten)]
    pub review: Review,
    pub username: Option<String>,
}

impl HeroReview {
    #[must_use]
    pub fn new(review: reviews::Model, author: Option<users::Model>) -> Self {
        Self {
            review: Review::from(review),
            username: author.map(|u| u.username),
        }
    }
}

/// A review as listed on its author's profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserReview {
    #[serde(flatten)]
    pub review: Review,
    pub hero_name: Option<String>,
    pub hero_image: Option<String>,
}

impl UserReview {
    #[must_use]
    pub fn new(review: reviews::Model, hero: Option<heroes::Model>) -> Self {
        let (hero_name, hero_image) = match hero {
            Some(hero) => (Some(hero.name), hero.image),
            None => (None, None),
        };
        Self {
            review: Review::from(review),
            hero_name,
            hero_image,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedReview {
    pub review: Review,
    pub is_update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroReviewPage {
    pub reviews: Vec<HeroReview>,
    pub stats: ReviewStats,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub hero_id: String,
    pub user_id: String,
    pub rating: i32,
    pub review_text: String,
}

/// Fields an owner may change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}

#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    /// Creates the caller's review of a hero, or overwrites it if one exists.
    ///
    /// # Errors
    ///
    /// [`ReviewError::Validation`] for a rating outside 1..=5 or blank text,
    /// [`ReviewError::NotFound`] when the hero or user does not exist.
    async fn submit_review(&self, submission: ReviewSubmission)
    -> Result<SubmittedReview, ReviewError>;

    /// Newest-first page of a hero's reviews plus stats over all of them.
    async fn list_reviews_for_hero(
        &self,
        hero_id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<HeroReviewPage, ReviewError>;

    /// # Errors
    ///
    /// [`ReviewError::NotFound`] both when the review is missing and when
    /// `user_id` does not own it.
    async fn update_review(
        &self,
        review_id: &str,
        user_id: &str,
        changes: ReviewChanges,
    ) -> Result<Review, ReviewError>;

    /// # Errors
    ///
    /// [`ReviewError::NotFound`] both when the review is missing and when
    /// `user_id` does not own it.
    async fn delete_review(&self, review_id: &str, user_id: &str) -> Result<(), ReviewError>;

    async fn list_user_reviews(&self, user_id: &str) -> Result<Vec<UserReview>, ReviewError>;
}
