//! Cookie session and flash messages
//!
//! Both live in signed cookies: `curr_user` carries the logged-in user id,
//! `flash` carries a queue of messages shown on the next rendered page.
//! A cookie whose signature fails is ignored.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies, Key};

/// Cookie holding the logged-in user's id
pub const SESSION_COOKIE: &str = "curr_user";

/// Cookie holding pending flash messages
const FLASH_COOKIE: &str = "flash";

/// Derive the cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Flash message category, used as the bootstrap alert class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

/// A one-shot message for the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

/// Request-scoped view of the session cookies
#[derive(Clone)]
pub struct Session {
    cookies: Cookies,
    key: Key,
}

impl Session {
    pub fn new(cookies: Cookies, key: Key) -> Self {
        Self { cookies, key }
    }

    /// Id of the logged-in user, if any.
    pub fn user_id(&self) -> Option<i32> {
        self.cookies
            .signed(&self.key)
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().parse().ok())
    }

    pub fn login(&self, user_id: i32) {
        tracing::debug!(user_id, "session login");
        self.cookies
            .signed(&self.key)
            .add(session_cookie(SESSION_COOKIE, user_id.to_string()));
    }

    pub fn logout(&self) {
        self.cookies.signed(&self.key).remove(removal_cookie(SESSION_COOKIE));
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, category: FlashCategory, message: impl Into<String>) {
        let mut flashes = self.read_flashes();
        flashes.push(Flash {
            category,
            message: message.into(),
        });
        self.write_flashes(&flashes);
    }

    /// Remove and return all pending messages.
    pub fn take_flashes(&self) -> Vec<Flash> {
        let flashes = self.read_flashes();
        if !flashes.is_empty() {
            self.cookies.signed(&self.key).remove(removal_cookie(FLASH_COOKIE));
        }
        flashes
    }

    fn read_flashes(&self) -> Vec<Flash> {
        self.cookies
            .signed(&self.key)
            .get(FLASH_COOKIE)
            .and_then(|c| decode_flashes(c.value()))
            .unwrap_or_default()
    }

    fn write_flashes(&self, flashes: &[Flash]) {
        match encode_flashes(flashes) {
            Some(value) => self
                .cookies
                .signed(&self.key)
                .add(session_cookie(FLASH_COOKIE, value)),
            None => tracing::warn!("dropping flash messages that failed to encode"),
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        Ok(Self::new(cookies, Key::from_ref(state)))
    }
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}

/// Cookie values may not carry spaces, commas or quotes, so the JSON is base64'd.
fn encode_flashes(flashes: &[Flash]) -> Option<String> {
    let json = serde_json::to_vec(flashes).ok()?;
    Some(URL_SAFE_NO_PAD.encode(json))
}

fn decode_flashes(value: &str) -> Option<Vec<Flash>> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}
