//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::AuthConfig;
use crate::db::Store;
use crate::models::user::User;
use crate::services::auth_service::{AuthError, AuthService, Claims, LoginResult};

/// HS256 signer/verifier built from the configured secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.signing_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(i64::from(config.token_ttl_hours)),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

pub struct SeaOrmAuthService {
    store: Store,
    signer: TokenSigner,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, config: &AuthConfig) -> Self {
        Self {
            store,
            signer: TokenSigner::new(config),
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.signer.issue(&user)?;

        Ok(LoginResult { user, token })
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.signer.verify(token)?;

        self.store
            .get_user(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
