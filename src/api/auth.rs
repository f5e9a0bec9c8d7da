//! Login, logout and the login page

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{config::SessionConfig, error::{AppError, AppResult}, AppState};

use super::{flash, SessionContext};

/// Login form
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Data for the login page
#[derive(Serialize, ToSchema)]
pub struct LoginView {
    /// Messages from the previous request
    pub flashes: Vec<String>,
}

fn session_removal(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone()).path("/").build()
}

fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Login page; logged-in users go straight to the dashboard.
/// A cookie naming an unknown or expired session is cleared.
#[utoipa::path(
    get,
    path = "/",
    tag = "auth",
    responses(
        (status = 200, description = "Login page", body = LoginView),
        (status = 303, description = "Already logged in, redirect to /dashboard")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    context: SessionContext,
    jar: CookieJar,
) -> Response {
    if context.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }

    let jar = if context.session_id.is_some() {
        jar.remove(session_removal(&state.config.session))
    } else {
        jar
    };
    let (jar, flashes) = flash::take(jar);
    (jar, Json(LoginView { flashes })).into_response()
}

/// Authenticate and start a session, replacing any session the client already holds
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /dashboard on success, back to / with a flash message otherwise")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    context: SessionContext,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Some(previous) = context.session_id {
        state.services.auth.close_session(&previous).await?;
    }

    match state.services.auth.login(&form.username, &form.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state.config.session, session.id));
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(e @ AppError::Authentication(_)) => {
            let jar = flash::push(jar.remove(session_removal(&state.config.session)), e.user_message());
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// End the current session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cleared, redirect to /")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    context: SessionContext,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    if let Some(session_id) = context.session_id {
        state.services.auth.close_session(&session_id).await?;
    }

    Ok((jar.remove(session_removal(&state.config.session)), Redirect::to("/")))
}
