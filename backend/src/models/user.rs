use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use shared::{User, UserRole, UserStatus};

/// Database model for users. The password hash stays inside the backend;
/// `to_shared` is the only way out and it drops the hash.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn to_shared(&self) -> User {
        User {
            id: Uuid::parse_str(&self.id).unwrap(),
            email: self.email.clone(),
            role: UserRole::from_str(&self.role).unwrap_or(UserRole::Buyer),
            // Unknown status fails closed: such an account cannot log in.
            status: UserStatus::from_str(&self.status).unwrap_or(UserStatus::Suspended),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
