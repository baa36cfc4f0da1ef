//! Integration tests for the Essence storefront.
//!
//! The full router runs in-process with an in-memory session store and no
//! simulated latency. [`TestClient`] carries the session cookie between
//! requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p essence-integration-tests
//! ```

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use essence_storefront::config::StorefrontConfig;
use essence_storefront::middleware::create_session_layer;
use essence_storefront::state::AppState;

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// A header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// In-process client for the storefront router.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Build the storefront with a fresh in-memory session store.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog fails to load.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            simulated_latency: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        let session_layer = create_session_layer(MemoryStore::default(), &config);
        let state =
            AppState::with_bundled_catalog(config, None).expect("bundled catalog should load");

        let router = essence_storefront::app()
            .layer(session_layer)
            .with_state(state);

        Self {
            router,
            cookie: None,
        }
    }

    /// `GET` a path.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None, false).await
    }

    /// `POST` a urlencoded form.
    pub async fn post_form(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, Some(encode_form(form)), false)
            .await
    }

    /// `POST` a urlencoded form as HTMX would.
    pub async fn htmx_post_form(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, Some(encode_form(form)), true)
            .await
    }

    /// Add a product to the cart through the non-HTMX form.
    pub async fn add_to_cart(&mut self, id: &str, quantity: u32) -> TestResponse {
        let quantity = quantity.to_string();
        self.post_form("/cart/add", &[("id", id), ("quantity", &quantity)])
            .await
    }

    #[allow(clippy::expect_used)]
    async fn send(
        &mut self,
        method: Method,
        path: &str,
        form: Option<String>,
        htmx: bool,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if htmx {
            builder = builder.header("hx-request", "true");
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Urlencode form pairs.
fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                char::from(byte).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{byte:02X}"),
        })
        .collect()
}
