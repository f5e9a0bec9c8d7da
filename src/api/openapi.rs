//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, dashboard, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark",
        version = "0.1.0",
        description = "Minimal library management: session login, book inventory, issue and return"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::index,
        auth::login,
        auth::logout,
        // Books
        dashboard::dashboard,
        books::list_books,
        books::add_book,
        books::issue_book,
        books::return_book,
    ),
    components(
        schemas(
            auth::LoginForm,
            auth::LoginView,
            books::BooksView,
            dashboard::DashboardView,
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SessionCookie),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login and session endpoints"),
        (name = "books", description = "Catalog and circulation")
    )
)]
pub struct ApiDoc;

struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/login", "/logout", "/dashboard", "/books", "/add_book", "/issue/{id}", "/return/{id}", "/health", "/ready"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
