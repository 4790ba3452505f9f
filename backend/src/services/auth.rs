use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand_core::OsRng;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{profile_table, ProfileRow, RefreshTokenRow, UserRow};
use crate::services::tokens::{TokenError, TokenIssuer};
use shared::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPair, User, UserWithProfile,
};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,
    // One message for unknown email and wrong password, so callers
    // cannot enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is not active")]
    AccountDisabled,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("User not found")]
    UserNotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Password hashing error")]
    HashingError,
    #[error("JWT error: {0}")]
    JwtError(#[from] TokenError),
}

/// Session/credential manager: owns credential verification, token
/// issuance, and the refresh-token lifecycle. Constructed once at startup
/// and handed to handlers through the application state.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: TokenIssuer) -> Self {
        Self { pool, tokens }
    }

    /// Create a user plus its role profile (one transaction) and open a
    /// session for it.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<(User, TokenPair), AuthError> {
        if !is_valid_email(&request.email) {
            return Err(AuthError::InvalidInput("Invalid email address".to_string()));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(&request.email)
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(request.password.clone()).await?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        // User and profile are one atomic unit: a user must never exist
        // without its role profile.
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, 'ACTIVE', ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&request.email)
        .bind(&password_hash)
        .bind(request.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            // Loser of a concurrent registration race surfaces the same
            // error as the pre-check.
            return Err(if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::DatabaseError(e)
            });
        }

        sqlx::query(&format!(
            "INSERT INTO {} (id, user_id, company_name, created_at) VALUES (?, ?, ?, ?)",
            profile_table(request.role)
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(id.to_string())
        .bind(&request.company_name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let user = User {
            id,
            email: request.email.clone(),
            role: request.role,
            status: shared::UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let pair = self.open_session(&user).await?;

        Ok((user, pair))
    }

    /// Verify credentials and open a fresh session. Unknown email and
    /// wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: &LoginRequest) -> Result<(User, TokenPair), AuthError> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE email = ?")
            .bind(&request.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(request.password.clone(), row.password_hash.clone()).await?;

        let user = row.to_shared();
        if !user.status.is_active() {
            return Err(AuthError::AccountDisabled);
        }

        let pair = self.open_session(&user).await?;

        Ok((user, pair))
    }

    /// Exchange a refresh token for a new pair, rotating the persisted
    /// record in place. The token must verify cryptographically and match
    /// a live stored record; the stored expiry and the embedded claim are
    /// both checked, and the stricter governs.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.tokens
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let record: RefreshTokenRow = sqlx::query_as("SELECT * FROM refresh_tokens WHERE token = ?")
            .bind(refresh_token)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if record.expires_at < Utc::now() {
            sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
                .bind(&record.id)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&record.user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;
        let user = user.to_shared();

        let pair = self.tokens.issue_pair(&user.id, &user.email, user.role)?;
        let expires_at = self.tokens.refresh_expiry(&pair.refresh_token);

        sqlx::query("UPDATE refresh_tokens SET token = ?, expires_at = ? WHERE id = ?")
            .bind(&pair.refresh_token)
            .bind(expires_at)
            .bind(&record.id)
            .execute(&self.pool)
            .await?;

        Ok(pair)
    }

    /// Remove every refresh token for the user. Idempotent.
    pub async fn logout(&self, user_id: &Uuid) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace the stored hash and force re-authentication on every
    /// session by removing all refresh tokens.
    pub async fn change_password(
        &self,
        user_id: &Uuid,
        request: &ChangePasswordRequest,
    ) -> Result<(), AuthError> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(request.current_password.clone(), row.password_hash.clone()).await?;

        if request.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = hash_password(request.new_password.clone()).await?;

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        self.logout(user_id).await
    }

    /// User joined with its single role profile, sanitized: the password
    /// hash never leaves this component.
    pub async fn get_profile(&self, user_id: &Uuid) -> Result<UserWithProfile, AuthError> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let user = row.to_shared();

        let profile: ProfileRow = sqlx::query_as(&format!(
            "SELECT * FROM {} WHERE user_id = ?",
            profile_table(user.role)
        ))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::UserNotFound)?;

        Ok(UserWithProfile {
            user,
            profile: profile.to_shared(),
        })
    }

    /// Look up a user by id (used by the per-request active-status gate).
    pub async fn get_user(&self, user_id: &Uuid) -> Result<Option<User>, AuthError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.to_shared()))
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Issue a token pair and persist its refresh half.
    async fn open_session(&self, user: &User) -> Result<TokenPair, AuthError> {
        let pair = self.tokens.issue_pair(&user.id, &user.email, user.role)?;
        let expires_at = self.tokens.refresh_expiry(&pair.refresh_token);
        self.store_sole_refresh_token(&user.id, &pair.refresh_token, expires_at)
            .await?;

        Ok(pair)
    }

    /// Persist `token` as the user's refresh token. Invariant: at most one
    /// live refresh token per user; prior tokens are removed in the same
    /// transaction.
    async fn store_sole_refresh_token(
        &self,
        user_id: &Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        }
        None => false,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Argon2 is CPU-bound, so hashing runs on the blocking pool rather than
/// stalling the async executor.
async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::HashingError)
    })
    .await
    .map_err(|_| AuthError::HashingError)?
}

async fn verify_password(password: String, stored_hash: String) -> Result<(), AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    })
    .await
    .map_err(|_| AuthError::HashingError)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{UserRole, UserStatus};
    use sqlx::sqlite::SqlitePoolOptions;

    // In-memory SQLite gives every pooled connection its own database, so
    // the test pool is pinned to a single connection.
    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE users (
                id TEXT PRIMARY KEY NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL CHECK(role IN ('BUYER', 'SELLER', 'FINANCIER')),
                status TEXT NOT NULL DEFAULT 'ACTIVE',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        for table in ["buyer_profiles", "seller_profiles", "financier_profiles"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE {} (
                    id TEXT PRIMARY KEY NOT NULL,
                    user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
                    company_name TEXT NOT NULL,
                    created_at DATETIME NOT NULL
                )
                "#,
                table
            ))
            .execute(&pool)
            .await
            .unwrap();
        }

        sqlx::query(
            r#"
            CREATE TABLE refresh_tokens (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id),
                token TEXT NOT NULL UNIQUE,
                expires_at DATETIME NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn service() -> AuthService {
        let pool = setup_test_db().await;
        AuthService::new(pool, TokenIssuer::new("test-secret", 15, 7))
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "Password1!".to_string(),
            role: UserRole::Buyer,
            company_name: "Acme".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn refresh_token_count(service: &AuthService, user_id: &Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&service.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let service = service().await;

        let (user, _) = service.register(&register_request("a@b.com")).await.unwrap();

        let (logged_in, pair) = service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);

        let claims = service.tokens().verify(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.role, UserRole::Buyer);
    }

    #[tokio::test]
    async fn test_register_creates_user_and_profile_atomically() {
        let service = service().await;

        let request = RegisterRequest {
            role: UserRole::Financier,
            ..register_request("f@example.com")
        };
        let (user, _) = service.register(&request).await.unwrap();
        assert_eq!(user.status, UserStatus::Active);

        let profiles: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM financier_profiles WHERE user_id = ?")
                .bind(user.id.to_string())
                .fetch_one(&service.pool)
                .await
                .unwrap();
        assert_eq!(profiles, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let service = service().await;

        service.register(&register_request("a@b.com")).await.unwrap();
        let err = service
            .register(&register_request("a@b.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let service = service().await;

        let bad_email = register_request("not-an-email");
        assert!(matches!(
            service.register(&bad_email).await.unwrap_err(),
            AuthError::InvalidInput(_)
        ));

        let mut short_password = register_request("a@b.com");
        short_password.password = "short".to_string();
        assert!(matches!(
            service.register(&short_password).await.unwrap_err(),
            AuthError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service().await;
        service.register(&register_request("a@b.com")).await.unwrap();

        let wrong_password = service
            .login(&login_request("a@b.com", "wrong-password"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(&login_request("nobody@b.com", "Password1!"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_refused_unless_active() {
        let service = service().await;
        let (user, _) = service.register(&register_request("a@b.com")).await.unwrap();

        sqlx::query("UPDATE users SET status = 'SUSPENDED' WHERE id = ?")
            .bind(user.id.to_string())
            .execute(&service.pool)
            .await
            .unwrap();

        let err = service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_login_keeps_a_single_refresh_token() {
        let service = service().await;
        let (user, _) = service.register(&register_request("a@b.com")).await.unwrap();

        service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .unwrap();
        service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .unwrap();

        assert_eq!(refresh_token_count(&service, &user.id).await, 1);
    }

    #[tokio::test]
    async fn test_refresh_unknown_token_is_unauthorized() {
        let service = service().await;
        service.register(&register_request("a@b.com")).await.unwrap();

        // Cryptographically valid but never persisted.
        let stray = service
            .tokens()
            .issue_pair(&Uuid::new_v4(), "x@y.com", UserRole::Seller)
            .unwrap();

        let err = service.refresh(&stray.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_with_garbage_is_unauthorized() {
        let service = service().await;
        let err = service.refresh("not.a.token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_expired_record_is_removed() {
        let service = service().await;
        let (user, pair) = service.register(&register_request("a@b.com")).await.unwrap();

        // Stored expiry governs even while the embedded claim is valid.
        sqlx::query("UPDATE refresh_tokens SET expires_at = ? WHERE user_id = ?")
            .bind(Utc::now() - chrono::Duration::minutes(1))
            .bind(user.id.to_string())
            .execute(&service.pool)
            .await
            .unwrap();

        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
        assert_eq!(refresh_token_count(&service, &user.id).await, 0);
    }

    #[tokio::test]
    async fn test_refresh_rotates_in_place() {
        let service = service().await;
        let (user, pair) = service.register(&register_request("a@b.com")).await.unwrap();

        let record_id: String =
            sqlx::query_scalar("SELECT id FROM refresh_tokens WHERE user_id = ?")
                .bind(user.id.to_string())
                .fetch_one(&service.pool)
                .await
                .unwrap();

        let new_pair = service.refresh(&pair.refresh_token).await.unwrap();

        assert_eq!(refresh_token_count(&service, &user.id).await, 1);

        let (rotated_id, stored_token): (String, String) =
            sqlx::query_as("SELECT id, token FROM refresh_tokens WHERE user_id = ?")
                .bind(user.id.to_string())
                .fetch_one(&service.pool)
                .await
                .unwrap();
        assert_eq!(rotated_id, record_id);
        assert_eq!(stored_token, new_pair.refresh_token);
    }

    #[tokio::test]
    async fn test_logout_invalidates_refresh_and_is_idempotent() {
        let service = service().await;
        let (user, pair) = service.register(&register_request("a@b.com")).await.unwrap();

        service.logout(&user.id).await.unwrap();
        assert_eq!(refresh_token_count(&service, &user.id).await, 0);

        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        // No tokens left; still succeeds.
        service.logout(&user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_leaves_hash() {
        let service = service().await;
        let (user, _) = service.register(&register_request("a@b.com")).await.unwrap();

        let hash_before: String =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
                .bind(user.id.to_string())
                .fetch_one(&service.pool)
                .await
                .unwrap();

        let err = service
            .change_password(
                &user.id,
                &ChangePasswordRequest {
                    current_password: "wrong-password".to_string(),
                    new_password: "NewPassword1!".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let hash_after: String =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
                .bind(user.id.to_string())
                .fetch_one(&service.pool)
                .await
                .unwrap();
        assert_eq!(hash_before, hash_after);
    }

    #[tokio::test]
    async fn test_change_password_rotates_credentials() {
        let service = service().await;
        let (user, pair) = service.register(&register_request("a@b.com")).await.unwrap();

        service
            .change_password(
                &user.id,
                &ChangePasswordRequest {
                    current_password: "Password1!".to_string(),
                    new_password: "NewPassword1!".to_string(),
                },
            )
            .await
            .unwrap();

        // Every session is forced to re-authenticate.
        assert_eq!(refresh_token_count(&service, &user.id).await, 0);
        let err = service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        assert!(service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .is_err());
        service
            .login(&login_request("a@b.com", "NewPassword1!"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_unknown_user_is_not_found() {
        let service = service().await;

        let err = service
            .change_password(
                &Uuid::new_v4(),
                &ChangePasswordRequest {
                    current_password: "Password1!".to_string(),
                    new_password: "NewPassword1!".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_get_profile_joins_role_profile() {
        let service = service().await;
        let request = RegisterRequest {
            role: UserRole::Seller,
            company_name: "Widgets GmbH".to_string(),
            ..register_request("s@example.com")
        };
        let (user, _) = service.register(&request).await.unwrap();

        let result = service.get_profile(&user.id).await.unwrap();
        assert_eq!(result.user.id, user.id);
        assert_eq!(result.profile.user_id, user.id);
        assert_eq!(result.profile.company_name, "Widgets GmbH");
    }

    #[tokio::test]
    async fn test_get_profile_unknown_user_is_not_found() {
        let service = service().await;
        let err = service.get_profile(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_registration_scenario() {
        let service = service().await;

        let (user, _) = service.register(&register_request("a@b.com")).await.unwrap();
        assert_eq!(user.status.as_str(), "ACTIVE");

        assert!(matches!(
            service.register(&register_request("a@b.com")).await,
            Err(AuthError::EmailTaken)
        ));

        let (_, pair) = service
            .login(&login_request("a@b.com", "Password1!"))
            .await
            .unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());

        assert!(matches!(
            service.login(&login_request("a@b.com", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name@sub.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
    }
}
