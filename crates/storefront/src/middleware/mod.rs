//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. Session layer (tower-sessions, added by the caller with its store)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Security headers (CSP, frame denial, etc.)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
