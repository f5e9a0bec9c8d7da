//! Business logic services

pub mod auth;
pub mod catalog;

use crate::{
    config::{SeedConfig, SessionConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, session_config: SessionConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), session_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            repository,
        }
    }

    /// Insert the seed credential and sample books into an empty store
    pub async fn seed(&self, seed: &SeedConfig) -> AppResult<()> {
        self.auth
            .ensure_user(&seed.admin_username, &seed.admin_password)
            .await?;
        self.catalog.seed().await?;
        Ok(())
    }
}
