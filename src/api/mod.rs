//! HTTP handlers for Shelfmark endpoints

pub mod auth;
pub mod books;
pub mod dashboard;
pub mod flash;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{error::AppError, AppState};

/// Per-request view of the caller's session.
///
/// `session_id` is whatever the session cookie carried; `username` is set only
/// when that id maps to a live session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub session_id: Option<String>,
    pub username: Option<String>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(session_id) = jar
            .get(&state.config.session.cookie_name)
            .map(|cookie| cookie.value().to_string())
        else {
            return Ok(Self::default());
        };

        let username = state.services.auth.resolve_session(&session_id).await?;

        Ok(Self {
            session_id: Some(session_id),
            username,
        })
    }
}

/// Extractor for routes that require a logged-in user; rejects with a
/// redirect to the login page.
pub struct CurrentUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let context = SessionContext::from_request_parts(parts, state).await?;
        context
            .username
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/", get(auth::index))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        // Catalog
        .route("/dashboard", get(dashboard::dashboard))
        .route("/books", get(books::list_books))
        .route("/add_book", post(books::add_book))
        .route("/issue/:id", get(books::issue_book))
        .route("/return/:id", get(books::return_book))
        .with_state(state);

    Router::new()
        .merge(app)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
