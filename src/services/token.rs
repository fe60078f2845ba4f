//! Signed bearer tokens carrying the caller identity.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::db::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub is_hero: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Not a JWT at all.
    Malformed,
    /// Well-formed but expired or signed with another key.
    Invalid,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &str, ttl_hours: u32) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    /// Builds a codec from config, generating an ephemeral secret when none
    /// is configured.
    #[must_use]
    pub fn from_config(security: &SecurityConfig, secret: Option<String>) -> Self {
        let secret = secret.unwrap_or_else(|| {
            tracing::warn!(
                "No JWT secret configured (security.jwt_secret / JWT_SECRET); \
                 using a random one, issued tokens will not survive a restart"
            );
            random_secret()
        });
        Self::new(&secret, security.token_ttl_hours)
    }

    pub fn issue(&self, user: &User) -> anyhow::Result<String> {
        self.issue_at(user, Utc::now().timestamp())
    }

    pub fn issue_at(&self, user: &User, issued_at: i64) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            is_hero: user.is_hero,
            iat: issued_at,
            exp: issued_at + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenRejection::Malformed,
                _ => TokenRejection::Invalid,
            })
    }
}

fn random_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
