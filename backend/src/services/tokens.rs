use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared::{TokenPair, UserRole};

/// Expiry applied to a persisted refresh token when its own exp claim
/// cannot be decoded.
const FALLBACK_REFRESH_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token subject")]
    InvalidSubject,
}

/// Claims carried by both halves of a token pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidSubject)
    }
}

/// Signs and verifies the HS256 tokens this service issues.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_expires: Duration,
    refresh_expires: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_expires_minutes: i64, refresh_expires_days: i64) -> Self {
        Self {
            secret: secret.to_string(),
            access_expires: Duration::minutes(access_expires_minutes),
            refresh_expires: Duration::days(refresh_expires_days),
        }
    }

    /// Issue an access/refresh pair, both encoding user id, email and role.
    pub fn issue_pair(
        &self,
        user_id: &Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, email, role, self.access_expires)?,
            refresh_token: self.sign(user_id, email, role, self.refresh_expires)?,
        })
    }

    fn sign(
        &self,
        user_id: &Uuid,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Expiry timestamp to persist alongside a refresh token, taken from the
    /// token's own exp claim. A token we just signed failing to decode means
    /// the secret or config is skewed, so the fallback is logged loudly.
    pub fn refresh_expiry(&self, token: &str) -> DateTime<Utc> {
        match self
            .verify(token)
            .ok()
            .and_then(|claims| DateTime::from_timestamp(claims.exp, 0))
        {
            Some(expiry) => expiry,
            None => {
                log::warn!(
                    "could not decode expiry from a freshly issued refresh token; \
                     falling back to {} days",
                    FALLBACK_REFRESH_EXPIRY_DAYS
                );
                Utc::now() + Duration::days(FALLBACK_REFRESH_EXPIRY_DAYS)
            }
        }
    }
}
