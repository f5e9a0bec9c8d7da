//! One-shot flash messages carried across a redirect in a cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

pub const FLASH_COOKIE: &str = "flash";

/// Queue a message for the next page that renders flashes
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let mut messages = read(&jar);
    messages.push(message.into());

    let value = match serde_json::to_vec(&messages) {
        Ok(json) => URL_SAFE_NO_PAD.encode(json),
        Err(e) => {
            tracing::error!("Failed to encode flash messages: {}", e);
            return jar;
        }
    };

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Consume all pending messages, clearing the cookie
pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    let messages = read(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

/// Undecodable cookies are treated as empty
fn read(jar: &CookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
