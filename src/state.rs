use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, HeroService, RequestService, ReviewService, SeaOrmAuthService,
    SeaOrmHeroService, SeaOrmRequestService, SeaOrmReviewService, TokenCodec,
};

/// Services wired over one store. Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub hero_service: Arc<dyn HeroService>,

    pub review_service: Arc<dyn ReviewService>,

    pub request_service: Arc<dyn RequestService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services over an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let tokens = TokenCodec::from_config(&config.security, config.jwt_secret());

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens,
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let hero_service = Arc::new(SeaOrmHeroService::new(store.clone())) as Arc<dyn HeroService>;

        let review_service = Arc::new(SeaOrmReviewService::new(
            store.clone(),
            config.reviews.clone(),
        )) as Arc<dyn ReviewService>;

        let request_service = Arc::new(SeaOrmRequestService::new(
            store.clone(),
            config.requests.clone(),
        )) as Arc<dyn RequestService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            hero_service,
            review_service,
            request_service,
        }
    }
}
