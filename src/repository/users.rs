//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::user::User};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get user by username (exact match)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already taken
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a user with an already hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support;

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let repository = test_support::repository().await;
        repository.users.create("admin", "hash").await.unwrap();

        assert!(repository.users.get_by_username("admin").await.unwrap().is_some());
        assert!(repository.users.get_by_username("Admin").await.unwrap().is_none());
        assert!(repository.users.get_by_username("admin ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repository = test_support::repository().await;
        repository.users.create("admin", "hash").await.unwrap();

        assert!(repository.users.username_exists("admin").await.unwrap());
        assert!(repository.users.create("admin", "other").await.is_err());
    }
}
