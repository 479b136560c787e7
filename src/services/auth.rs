//! Authentication service
//!
//! Implements the JWT auth flow:
//! - Registration with uniqueness checks and Argon2id hashing
//! - Login returning an access/refresh token pair
//! - Refresh exchanging a valid refresh token for a fresh pair
//! - Token validation for the request-authentication gate
//!
//! Login failures are deliberately indistinguishable: unknown email,
//! inactive account, and wrong password all produce the same error so a
//! caller cannot probe which accounts exist.

use crate::config::AuthConfig;
use crate::db::repositories::UserRepository;
use crate::models::NewUser;
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{Claims, TokenService};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

/// Error types for auth service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Authentication failed (invalid credentials or token)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Identity and token pair returned by register, login, and refresh
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Auth service managing credentials and tokens
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new auth service over a user repository
    pub fn new(user_repo: Arc<dyn UserRepository>, config: &AuthConfig) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config),
        }
    }

    /// Register a new user and sign them in
    ///
    /// The two uniqueness lookups are not atomic; concurrent
    /// registrations of the same identity can pass both and fail at the
    /// storage unique constraint, which is the authoritative guard.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username, email, or password is unusable
    /// - `UserExists` if username or email is already taken
    /// - `InternalError` for database errors
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthServiceError> {
        validate_register_input(username, email, password)?;

        if self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(AuthServiceError::UserExists(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        if self
            .user_repo
            .get_by_email(email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(AuthServiceError::UserExists(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = hash_password(password).context("Failed to hash password")?;

        let user = self
            .user_repo
            .create(&NewUser::with_defaults(
                username.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await
            .context("Failed to create user")?;

        self.issue_pair(&user)
    }

    /// Login with email and password
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the email is unknown, the account is
    ///   inactive, or the password does not match
    /// - `InternalError` for database errors
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthServiceError> {
        let user = self
            .user_repo
            .get_by_email(email)
            .await
            .context("Failed to get user by email")?
            .ok_or_else(invalid_credentials)?;

        if !user.active {
            return Err(invalid_credentials());
        }

        let password_valid =
            verify_password(password, &user.password_hash).context("Failed to verify password")?;

        if !password_valid {
            return Err(invalid_credentials());
        }

        self.issue_pair(&user)
    }

    /// Exchange a refresh token for a fresh access/refresh pair
    ///
    /// Old tokens are not revoked; they stay valid until their own
    /// expiry since no server-side token store exists.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the token fails verification, the
    ///   subject is unknown, or the account is inactive
    /// - `InternalError` for database errors
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse, AuthServiceError> {
        let claims = self.tokens.verify(refresh_token).map_err(|_| {
            AuthServiceError::AuthenticationError("Invalid or expired refresh token".to_string())
        })?;

        let user_id = claims.user_id().map_err(|_| {
            AuthServiceError::AuthenticationError("Invalid token claims".to_string())
        })?;

        let user = self
            .user_repo
            .get_by_id(user_id)
            .await
            .context("Failed to get user by ID")?
            .ok_or_else(|| {
                AuthServiceError::AuthenticationError("User not found".to_string())
            })?;

        if !user.active {
            return Err(AuthServiceError::AuthenticationError(
                "Account is inactive".to_string(),
            ));
        }

        self.issue_pair(&user)
    }

    /// Verify a token and return its decoded claims
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the signature, algorithm, or expiry
    ///   check fails
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthServiceError> {
        self.tokens.verify(token).map_err(|_| {
            AuthServiceError::AuthenticationError("Invalid or expired token".to_string())
        })
    }

    fn issue_pair(&self, user: &crate::models::User) -> Result<AuthResponse, AuthServiceError> {
        let access_token = self
            .tokens
            .issue_access_token(user)
            .context("Failed to issue access token")?;
        let refresh_token = self
            .tokens
            .issue_refresh_token(user)
            .context("Failed to issue refresh token")?;

        Ok(AuthResponse {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            access_token,
            refresh_token,
        })
    }
}

fn invalid_credentials() -> AuthServiceError {
    AuthServiceError::AuthenticationError("Invalid email or password".to_string())
}

fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthServiceError> {
    if username.trim().is_empty() {
        return Err(AuthServiceError::ValidationError(
            "Username cannot be empty".to_string(),
        ));
    }

    if email.trim().is_empty() {
        return Err(AuthServiceError::ValidationError(
            "Email cannot be empty".to_string(),
        ));
    }

    if password.len() < 6 {
        return Err(AuthServiceError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if !email.contains('@') {
        return Err(AuthServiceError::ValidationError(
            "Invalid email format".to_string(),
        ));
    }

    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::db::repositories::SqlxUserRepository;
    use crate::db::{create_test_pool, migrations};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    // Counter for generating unique usernames/emails across test iterations
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn unique_suffix() -> u64 {
        TEST_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    async fn setup_property_test_service() -> AuthService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let config = AuthConfig {
            secret: "property-test-secret".to_string(),
            issuer: "vitrine".to_string(),
            access_ttl_seconds: 3600,
            refresh_ttl_seconds: 86400,
            enable_registration: true,
        };

        AuthService::new(SqlxUserRepository::boxed(pool.clone()), &config)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// For any valid credentials, register then login succeeds and the
        /// issued access token validates back to the same user.
        #[test]
        fn property_auth_roundtrip(
            username in "[a-z]{3,10}",
            email_prefix in "[a-z]{3,10}",
            password in "[a-zA-Z0-9!@#$%^&*]{8,20}"
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let service = setup_property_test_service().await;
                let suffix = unique_suffix();

                let unique_username = format!("{}_{}", username, suffix);
                let unique_email = format!("{}_{}@example.com", email_prefix, suffix);

                let registered = service
                    .register(&unique_username, &unique_email, &password)
                    .await
                    .expect("Registration should succeed");

                let login = service
                    .login(&unique_email, &password)
                    .await
                    .expect("Login should succeed with valid credentials");
                prop_assert_eq!(login.user_id, registered.user_id);

                let claims = service
                    .validate_token(&login.access_token)
                    .expect("Issued token should validate");
                prop_assert_eq!(claims.sub, registered.user_id.to_string());
                prop_assert_eq!(claims.username, Some(unique_username));
                Ok(())
            });
            result?;
        }

        /// For any wrong password or unregistered email, login fails with
        /// the authentication error.
        #[test]
        fn property_invalid_credentials_rejected(
            username in "[a-z]{3,10}",
            email_prefix in "[a-z]{3,10}",
            correct_password in "[a-zA-Z0-9]{8,20}",
            wrong_password in "[a-zA-Z0-9]{8,20}"
        ) {
            prop_assume!(correct_password != wrong_password);

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let service = setup_property_test_service().await;
                let suffix = unique_suffix();

                let unique_username = format!("{}_{}", username, suffix);
                let unique_email = format!("{}_{}@example.com", email_prefix, suffix);

                service
                    .register(&unique_username, &unique_email, &correct_password)
                    .await
                    .expect("Registration should succeed");

                let wrong_result = service.login(&unique_email, &wrong_password).await;
                prop_assert!(
                    matches!(wrong_result, Err(AuthServiceError::AuthenticationError(_))),
                    "Wrong password should be rejected"
                );

                let unknown_email = format!("missing_{}@example.com", suffix);
                let unknown_result = service.login(&unknown_email, &correct_password).await;
                prop_assert!(
                    matches!(unknown_result, Err(AuthServiceError::AuthenticationError(_))),
                    "Unknown email should be rejected"
                );
                Ok(())
            });
            result?;
        }
    }
}
