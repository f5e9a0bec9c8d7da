//! User model

use serde::Serialize;
use sqlx::FromRow;

/// User account from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
