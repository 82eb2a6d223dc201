//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
///
/// `verification_code` is non-null only while the account is unverified;
/// successful verification clears it and sets `is_verified` for the life
/// of the account.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub verification_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contact row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Conversion implementations from row types to carnet-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> carnet_types::UserId {
        carnet_types::UserId(self.id)
    }
}

impl ContactRow {
    /// Convert to domain ContactId
    pub fn contact_id(&self) -> carnet_types::ContactId {
        carnet_types::ContactId(self.id)
    }

    /// Convert to domain UserId of the owner
    pub fn owner_user_id(&self) -> carnet_types::UserId {
        carnet_types::UserId(self.owner_id)
    }
}
