//! Shelfmark Library Management
//!
//! A small library-management web service: session login, a book inventory
//! with available/issued status, and issue/return transitions over SQLite.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Connect to the store, migrate, seed, and wire up the services
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let pool = repository::connect(&config.database).await?;
        let repository = repository::Repository::new(pool);
        repository.migrate().await?;

        let services = services::Services::new(repository, config.session.clone());
        services.seed(&config.seed).await?;
        let purged = services.auth.purge_expired_sessions().await?;
        if purged > 0 {
            tracing::info!("Removed {} expired sessions", purged);
        }

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
