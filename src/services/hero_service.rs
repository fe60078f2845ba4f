//! Read-only hero catalog with rating aggregates.

use serde::Serialize;
use thiserror::Error;

use crate::db::RatingSummary;
use crate::entities::heroes;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("Hero not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for HeroError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for HeroError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: f64,
    pub average_rating: f64,
    pub review_count: i64,
    pub created_at: String,
}

impl HeroSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(hero: heroes::Model, summary: RatingSummary) -> Self {
        let average_rating = if summary.review_count == 0 {
            0.0
        } else {
            let mean = summary.rating_sum as f64 / summary.review_count as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            id: hero.id,
            name: hero.name,
            description: hero.description,
            image: hero.image,
            price: hero.price,
            average_rating,
            review_count: summary.review_count,
            created_at: hero.created_at,
        }
    }
}

#[async_trait::async_trait]
pub trait HeroService: Send + Sync {
    /// All heroes ordered by name.
    async fn list_heroes(&self) -> Result<Vec<HeroSummary>, HeroError>;

    async fn get_hero(&self, hero_id: &str) -> Result<HeroSummary, HeroError>;
}
