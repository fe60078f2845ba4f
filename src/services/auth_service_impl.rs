//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;
use validator::ValidateEmail;

use crate::config::SecurityConfig;
use crate::db::repositories::user::hash_password;
use crate::db::{NewUser, Store, UserWrite};
use crate::services::auth_service::{
    AuthError, AuthService, AuthSession, CurrentUser, PublicUser, Registration, UserInfo,
};
use crate::services::token::{TokenCodec, TokenRejection};

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 6;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenCodec,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenCodec, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }

    fn session(&self, user: crate::db::User) -> Result<AuthSession, AuthError> {
        let token = self.tokens.issue(&user)?;
        Ok(AuthSession {
            user: UserInfo::from(user),
            token,
        })
    }
}

fn validate_registration(registration: &Registration) -> Result<(), AuthError> {
    let username_len = registration.username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username_len) {
        return Err(AuthError::Validation(format!(
            "Username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
        )));
    }
    if registration.username.chars().any(char::is_whitespace) {
        return Err(AuthError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    if !registration.email.validate_email() {
        return Err(AuthError::Validation("Invalid email address".to_string()));
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn duplicate_account() -> AuthError {
    AuthError::Conflict("Username or email already exists".to_string())
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<AuthSession, AuthError> {
        let registration = Registration {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_lowercase(),
            password: registration.password,
        };
        validate_registration(&registration)?;

        if self
            .store
            .user_exists(&registration.username, &registration.email)
            .await?
        {
            return Err(duplicate_account());
        }

        let is_hero = self
            .store
            .find_hero_by_name(&registration.username)
            .await?
            .is_some();

        let security = self.security.clone();
        let password = registration.password;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, Some(&security)))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        // A registration racing this one can still claim the name after the
        // check above; the unique indexes settle it.
        let user = match self
            .store
            .create_user(NewUser {
                username: &registration.username,
                email: &registration.email,
                password_hash,
                is_hero,
            })
            .await?
        {
            UserWrite::Created(user) => user,
            UserWrite::Duplicate => return Err(duplicate_account()),
        };

        info!(user_id = %user.id, username = %user.username, is_hero, "Registered user");
        self.session(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self
            .store
            .verify_user_password(username.trim(), password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.session(user)
    }

    fn verify_token(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let claims = self.tokens.verify(token).map_err(|rejection| match rejection {
            TokenRejection::Malformed => AuthError::MissingToken,
            TokenRejection::Invalid => AuthError::InvalidToken,
        })?;

        Ok(CurrentUser {
            id: claims.sub,
            username: claims.username,
            is_hero: claims.is_hero,
        })
    }

    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AuthError::NotFound("User not found".to_string()))?;

        Ok(UserInfo::from(user))
    }

    async fn promote(&self, username: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .set_user_hero(username, true)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("User '{username}' not found")))?;

        info!(user_id = %user.id, username = %user.username, "Promoted user to hero");
        Ok(UserInfo::from(user))
    }

    async fn list_users(&self) -> Result<Vec<PublicUser>, AuthError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    async fn get_profile(
        &self,
        caller: &CurrentUser,
        user_id: &str,
    ) -> Result<UserInfo, AuthError> {
        if caller.id != user_id {
            return Err(AuthError::Forbidden(
                "Cannot access another user's profile".to_string(),
            ));
        }

        self.get_user_info(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(&registration("bruce", "bruce@wayne.com", "secret")).is_ok());
        assert!(matches!(
            validate_registration(&registration("bw", "bruce@wayne.com", "secret")),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&registration("bruce", "not-an-email", "secret")),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&registration("bruce", "bruce@wayne.com", "12345")),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&registration("bruce wayne", "bruce@wayne.com", "secret")),
            Err(AuthError::Validation(_))
        ));
    }
}
