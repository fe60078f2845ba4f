//! `SeaORM` implementation of the `HeroService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::hero_service::{HeroError, HeroService, HeroSummary};

pub struct SeaOrmHeroService {
    store: Store,
}

impl SeaOrmHeroService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HeroService for SeaOrmHeroService {
    async fn list_heroes(&self) -> Result<Vec<HeroSummary>, HeroError> {
        let heroes = self.store.list_heroes().await?;
        let mut summaries = self.store.hero_rating_summaries().await?;

        Ok(heroes
            .into_iter()
            .map(|hero| {
                let summary = summaries.remove(&hero.id).unwrap_or_default();
                HeroSummary::new(hero, summary)
            })
            .collect())
    }

    async fn get_hero(&self, hero_id: &str) -> Result<HeroSummary, HeroError> {
        let hero = self
            .store
            .get_hero(hero_id)
            .await?
            .ok_or(HeroError::NotFound)?;

        let summary = self
            .store
            .hero_rating_summaries()
            .await?
            .remove(hero_id)
            .unwrap_or_default();

        Ok(HeroSummary::new(hero, summary))
    }
}
