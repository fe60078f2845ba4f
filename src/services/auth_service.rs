//! Domain service for accounts and caller identity.
//!
//! Handles registration, login, token verification and hero promotion.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Identity decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub is_hero: bool,
}

/// User info DTO for responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_hero: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_hero: user.is_hero,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Publicly listable user fields.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub is_hero: bool,
    pub created_at: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_hero: user.is_hero,
            created_at: user.created_at,
        }
    }
}

/// Register/login result: the account plus a freshly signed token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. Usernames matching a hero name become hero accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Conflict`] if the username or email is taken.
    async fn register(&self, registration: Registration) -> Result<AuthSession, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Decodes a bearer token into the caller identity.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingToken`] for an undecodable token,
    /// [`AuthError::InvalidToken`] for a bad signature or an expired token.
    fn verify_token(&self, token: &str) -> Result<CurrentUser, AuthError>;

    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, AuthError>;

    /// Marks an existing account as a hero account.
    async fn promote(&self, username: &str) -> Result<UserInfo, AuthError>;

    async fn list_users(&self) -> Result<Vec<PublicUser>, AuthError>;

    /// Profile of `user_id`; only visible to that user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] when `caller` is someone else.
    async fn get_profile(&self, caller: &CurrentUser, user_id: &str)
    -> Result<UserInfo, AuthError>;
}
