//! Dispatcher core module - request/response types and the middleware chain.

use http::Method;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::middleware::Middleware;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage
///
/// Header names use `Arc<str>` so repeated names clone in O(1). The same
/// name may appear more than once (multi-valued headers).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data passed through the middleware chain to a handler
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// HTTP headers
    pub headers: HeaderVec,
}

impl HandlerRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderVec) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
        }
    }

    /// Get a header value by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response produced by a handler or an early-returning middleware
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the first value of a header (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a header, in insertion order
    pub fn get_header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header, replacing every existing value
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Add another value for a header, keeping existing ones
    pub fn add_header(&mut self, name: &str, value: String) {
        self.headers.push((Arc::from(name), value));
    }
}

/// Runs registered middleware around a handler
///
/// For each request:
/// 1. every middleware's `before` runs in registration order; the first
///    early response wins and the handler is skipped
/// 2. the handler runs (unless short-circuited)
/// 3. every middleware's `after` runs in registration order
#[derive(Default)]
pub struct Dispatcher {
    /// Ordered list of middleware to apply to requests/responses
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add middleware to the processing pipeline
    ///
    /// Middleware is executed in the order it's added.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Pass `req` through the middleware chain and `handler`
    pub fn dispatch<F>(&self, req: &HandlerRequest, handler: F) -> HandlerResponse
    where
        F: FnOnce(&HandlerRequest) -> HandlerResponse,
    {
        debug!(
            method = %req.method,
            path = %req.path,
            middleware_count = self.middlewares.len(),
            "Middleware before execution"
        );

        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            if early_resp.is_none() {
                early_resp = mw.before(req);
                if early_resp.is_some() {
                    debug!(
                        middleware_idx = idx,
                        middleware_name = std::any::type_name_of_val(mw.as_ref()),
                        "Middleware returned early response"
                    );
                }
            } else {
                mw.before(req);
            }
        }

        let (mut resp, latency) = match early_resp {
            Some(r) => (r, Duration::from_millis(0)),
            None => {
                let start = Instant::now();
                let r = handler(req);
                (r, start.elapsed())
            }
        };

        for mw in &self.middlewares {
            mw.after(req, &mut resp, latency);
        }

        debug!(
            status = resp.status,
            latency_ms = latency.as_millis() as u64,
            "Middleware after execution"
        );
        resp
    }
}
