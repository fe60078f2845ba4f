pub mod token;
pub use token::TokenCodec;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, CurrentUser, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod hero_service;
pub mod hero_service_impl;
pub use hero_service::{HeroError, HeroService, HeroSummary};
pub use hero_service_impl::SeaOrmHeroService;

pub mod review_service;
pub mod review_service_impl;
pub use review_service::{ReviewError, ReviewService};
pub use review_service_impl::SeaOrmReviewService;

pub mod request_service;
pub mod request_service_impl;
pub use request_service::{RequestError, RequestService};
pub use request_service_impl::SeaOrmRequestService;
