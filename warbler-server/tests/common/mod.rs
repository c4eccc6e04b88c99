//! Shared helpers for router tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use warbler_server::db::migrations;
use warbler_server::{build_router, AppState, ServerConfig};

pub const TEST_DATABASE_URL: &str = "postgres:///warbler-test";

/// Database tests share one schema, so they take turns.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| TEST_DATABASE_URL.to_owned())
}

/// Router over a pool that never connects unless a handler queries it.
pub fn lazy_app() -> Router {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy(TEST_DATABASE_URL)
        .unwrap();
    build_router(AppState::new(pool, &ServerConfig::default()))
}

/// A freshly reset test database and a router over it.
pub struct TestDb {
    pub pool: PgPool,
    pub app: Router,
    _guard: MutexGuard<'static, ()>,
}

impl TestDb {
    pub async fn new() -> Self {
        let guard = DB_LOCK.lock().await;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url())
            .await
            .expect("connect to test database");
        migrations::reset(&pool).await.expect("reset schema");
        let app = build_router(AppState::new(pool.clone(), &ServerConfig::default()));
        Self {
            pool,
            app,
            _guard: guard,
        }
    }

    pub fn client(&self) -> Client {
        Client::new(self.app.clone())
    }
}

/// A response with its body read to a string
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Drives the router like a browser: keeps cookies across requests.
pub struct Client {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Client {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_owned(), value.to_owned());
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn get(&mut self, uri: &str) -> Page {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// POST, then follow the redirect with a GET.
    pub async fn post_and_follow(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let page = self.post(uri, form).await;
        match page.location() {
            Some(location) => {
                let location = location.to_owned();
                self.get(&location).await
            }
            None => page,
        }
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Page {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();

        for line in headers.get_all(header::SET_COOKIE) {
            let line = line.to_str().unwrap();
            let pair = line.split(';').next().unwrap_or_default();
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let expired = value.is_empty() || line.contains("Max-Age=0");
            if expired {
                self.cookies.remove(name.trim());
            } else {
                self.cookies.insert(name.trim().to_owned(), value.trim().to_owned());
            }
        }

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Page {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
