use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use shared::{Profile, UserRole};

/// Table holding the role-specific profile. Adding a role means adding an
/// arm here plus a migration; nothing else branches on role.
pub fn profile_table(role: UserRole) -> &'static str {
    match role {
        UserRole::Buyer => "buyer_profiles",
        UserRole::Seller => "seller_profiles",
        UserRole::Financier => "financier_profiles",
    }
}

/// Database model for role profiles. All three profile tables
/// (buyer_profiles, seller_profiles, financier_profiles) share this shape.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub user_id: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn to_shared(&self) -> Profile {
        Profile {
            id: Uuid::parse_str(&self.id).unwrap(),
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
            company_name: self.company_name.clone(),
            created_at: self.created_at,
        }
    }
}
