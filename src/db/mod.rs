use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, Statement, TransactionTrait,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{heroes, request_responses, requests, reviews, users};
use crate::models::request::RequestStatus;

pub mod migrator;
pub mod repositories;

pub use repositories::hero::RatingSummary;
pub use repositories::request::{
    ContentUpdate, NewRequestRow, RequestContentChanges, RequestDelete, StatusChange,
};
pub use repositories::review::ReviewWrite;
pub use repositories::user::{NewUser, User, UserWrite};

/// How long a writer waits for another writer's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Begins a transaction that holds the write lock from its first statement.
///
/// A deferred SQLite transaction that reads before it writes cannot take the
/// write lock once another writer has committed; it fails with `SQLITE_BUSY`
/// instead of waiting. Read-then-write transactions open with a write to
/// `column` that matches no rows, so they queue on [`BUSY_TIMEOUT`] and then
/// read committed state.
pub(crate) async fn begin_write<E: EntityTrait>(
    conn: &DatabaseConnection,
    column: E::Column,
) -> Result<DatabaseTransaction, DbErr> {
    let txn = conn.begin().await?;

    E::update_many()
        .col_expr(column, Expr::col(column).into())
        .filter(Expr::value(false))
        .exec(&txn)
        .await?;

    Ok(txn)
}

/// Cloneable handle over the connection pool. Every service receives its
/// own clone; connections are acquired per statement or transaction.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(|opts| opts.busy_timeout(BUSY_TIMEOUT));

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn hero_repo(&self) -> repositories::hero::HeroRepository {
        repositories::hero::HeroRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn request_repo(&self) -> repositories::request::RequestRepository {
        repositories::request::RequestRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(&self, new_user: NewUser<'_>) -> Result<UserWrite> {
        self.user_repo().create(new_user).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_exists(&self, username: &str, email: &str) -> Result<bool> {
        self.user_repo().exists(username, email).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn set_user_hero(&self, username: &str, is_hero: bool) -> Result<Option<User>> {
        self.user_repo().set_hero(username, is_hero).await
    }

    // Heroes

    pub async fn get_hero(&self, id: &str) -> Result<Option<heroes::Model>> {
        self.hero_repo().get(id).await
    }

    pub async fn list_heroes(&self) -> Result<Vec<heroes::Model>> {
        self.hero_repo().list().await
    }

    pub async fn find_hero_by_name(&self, name: &str) -> Result<Option<heroes::Model>> {
        self.hero_repo().find_by_name(name).await
    }

    pub async fn hero_rating_summaries(&self) -> Result<HashMap<String, RatingSummary>> {
        self.hero_repo().rating_summaries().await
    }

    // Reviews

    pub async fn upsert_review(
        &self,
        hero_id: &str,
        user_id: &str,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewWrite> {
        self.review_repo()
            .upsert(hero_id, user_id, rating, review_text)
            .await
    }

    pub async fn get_review(&self, id: &str) -> Result<Option<reviews::Model>> {
        self.review_repo().get(id).await
    }

    pub async fn list_reviews_for_hero(
        &self,
        hero_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<(reviews::Model, Option<users::Model>)>> {
        self.review_repo()
            .list_for_hero(hero_id, limit, offset)
            .await
    }

    pub async fn review_rating_counts(&self, hero_id: &str) -> Result<Vec<(i32, i64)>> {
        self.review_repo().rating_counts(hero_id).await
    }

    pub async fn count_reviews_for_hero(&self, hero_id: &str) -> Result<u64> {
        self.review_repo().count_for_hero(hero_id).await
    }

    pub async fn list_reviews_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(reviews::Model, Option<heroes::Model>)>> {
        self.review_repo().list_for_user(user_id).await
    }

    pub async fn update_owned_review(
        &self,
        id: &str,
        user_id: &str,
        rating: Option<i32>,
        review_text: Option<&str>,
    ) -> Result<Option<reviews::Model>> {
        self.review_repo()
            .update_owned(id, user_id, rating, review_text)
            .await
    }

    pub async fn delete_owned_review(&self, id: &str, user_id: &str) -> Result<bool> {
        self.review_repo().delete_owned(id, user_id).await
    }

    // Requests

    pub async fn create_request(&self, row: NewRequestRow) -> Result<requests::Model> {
        self.request_repo().create(row).await
    }

    pub async fn get_request(&self, id: &str) -> Result<Option<requests::Model>> {
        self.request_repo().get(id).await
    }

    pub async fn list_requests_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(requests::Model, Option<heroes::Model>)>> {
        self.request_repo().list_for_user(user_id).await
    }

    pub async fn list_requests_for_hero(
        &self,
        hero_id: &str,
        status: Option<RequestStatus>,
    ) -> Result<Vec<(requests::Model, Option<users::Model>)>> {
        self.request_repo().list_for_hero(hero_id, status).await
    }

    pub async fn latest_request_responses(
        &self,
        request_ids: &[String],
    ) -> Result<HashMap<String, request_responses::Model>> {
        self.request_repo().latest_responses(request_ids).await
    }

    pub async fn update_request_content(
        &self,
        id: &str,
        user_id: &str,
        changes: RequestContentChanges,
    ) -> Result<ContentUpdate> {
        self.request_repo()
            .update_content(id, user_id, changes)
            .await
    }

    pub async fn transition_request(
        &self,
        id: &str,
        next: RequestStatus,
        responder_id: &str,
        message: Option<&str>,
    ) -> Result<StatusChange> {
        self.request_repo()
            .transition(id, next, responder_id, message)
            .await
    }

    pub async fn delete_owned_request(&self, id: &str, user_id: &str) -> Result<RequestDelete> {
        self.request_repo().delete_owned(id, user_id).await
    }
}
