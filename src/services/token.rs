//! JWT issuance and verification
//!
//! Tokens are self-contained HS256 JWTs signed with the shared secret
//! from [`AuthConfig`]. Access tokens carry the user's identity claims;
//! refresh tokens carry only the subject. Verification pins the
//! algorithm to HS256 so a token signed with anything else is rejected
//! regardless of its header.

use crate::config::AuthConfig;
use crate::models::User;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by issued tokens.
///
/// `sub` is the user id, string-encoded. `username` and `role` are set
/// on access tokens and absent on refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// User id parsed back out of the subject claim
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .context("Token subject is not a numeric user id")
    }
}

/// Issues and verifies the JWT pair used by the auth service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service from auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is invalid the second it expires
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            access_ttl: Duration::seconds(config.access_ttl_seconds as i64),
            refresh_ttl: Duration::seconds(config.refresh_ttl_seconds as i64),
        }
    }

    /// Issue an access token carrying the user's identity claims
    pub fn issue_access_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: Some(user.username.clone()),
            role: Some(user.role.clone()),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        self.encode(&claims)
    }

    /// Issue a refresh token carrying only the subject
    pub fn issue_refresh_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: None,
            role: None,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        self.encode(&claims)
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Token verification failed")?;

        Ok(data.claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key).context("Failed to sign token")
    }
}
