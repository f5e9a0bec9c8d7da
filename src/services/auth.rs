//! Authentication and session service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::{session::Session, user::User},
    repository::Repository,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: SessionConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: SessionConfig) -> Self {
        Self { repository, config }
    }

    /// Check a username/password pair against the identity store.
    ///
    /// Surrounding whitespace is ignored on both fields.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let username = username.trim();
        let password = password.trim();

        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    /// Authenticate and open a session for the user
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = match self.authenticate(username, password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed login attempt for '{}'", username.trim());
                return Err(e);
            }
        };

        let session = self.open_session(&user.username).await?;
        tracing::info!("User '{}' logged in", user.username);
        Ok(session)
    }

    pub async fn open_session(&self, username: &str) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: now,
            expires_at: now + Duration::hours(self.config.ttl_hours),
        };
        self.repository.sessions.create(&session).await?;
        Ok(session)
    }

    /// Username bound to a live session, if any. Expired sessions are removed.
    pub async fn resolve_session(&self, session_id: &str) -> AppResult<Option<String>> {
        let Some(session) = self.repository.sessions.get(session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.is_expired(now) {
            tracing::debug!("Session for '{}' expired", session.username);
            self.repository.sessions.delete(session_id).await?;
            return Ok(None);
        }

        Ok(Some(session.username))
    }

    pub async fn close_session(&self, session_id: &str) -> AppResult<()> {
        if self.repository.sessions.delete(session_id).await? {
            tracing::info!("Session closed");
        }
        Ok(())
    }

    /// Drop all expired sessions, returning how many were removed
    pub async fn purge_expired_sessions(&self) -> AppResult<u64> {
        self.repository.sessions.delete_expired(Utc::now()).await
    }

    /// Create the account unless the username already exists.
    /// Returns `true` if a user was inserted.
    pub async fn ensure_user(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.repository.users.username_exists(username).await? {
            return Ok(false);
        }
        let hash = self.hash_password(password)?;
        self.repository.users.create(username, &hash).await?;
        tracing::info!("Created user '{}'", username);
        Ok(true)
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    async fn service() -> AuthService {
        let service = AuthService::new(test_support::repository().await, SessionConfig::default());
        service.ensure_user("admin", "1234").await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_authenticate_accepts_exact_credentials() {
        let service = service().await;
        let user = service.authenticate("admin", "1234").await.unwrap();
        assert_eq!(user.username, "admin");
        assert_ne!(user.password_hash, "1234");
    }

    #[tokio::test]
    async fn test_authenticate_trims_input() {
        let service = service().await;
        assert!(service.authenticate("  admin ", " 1234\n").await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_mismatch() {
        let service = service().await;
        for (username, password) in [("admin", "wrong"), ("Admin", "1234"), ("nobody", "1234"), ("", "")] {
            let err = service.authenticate(username, password).await.unwrap_err();
            assert!(matches!(err, AppError::Authentication(_)));
        }
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let service = service().await;
        assert!(!service.ensure_user("admin", "other").await.unwrap());
        // the original password still applies
        assert!(service.authenticate("admin", "1234").await.is_ok());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let service = service().await;
        let session = service.login("admin", "1234").await.unwrap();

        assert_eq!(
            service.resolve_session(&session.id).await.unwrap().as_deref(),
            Some("admin")
        );

        service.close_session(&session.id).await.unwrap();
        assert!(service.resolve_session(&session.id).await.unwrap().is_none());
        // closing twice is harmless
        service.close_session(&session.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let repository = test_support::repository().await;
        let config = SessionConfig {
            ttl_hours: -1,
            ..SessionConfig::default()
        };
        let service = AuthService::new(repository.clone(), config);
        let session = service.open_session("admin").await.unwrap();

        assert!(service.resolve_session(&session.id).await.unwrap().is_none());
        assert!(repository.sessions.get(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_resolves_to_none() {
        let service = service().await;
        assert!(service.resolve_session("not-a-session").await.unwrap().is_none());
    }
}
