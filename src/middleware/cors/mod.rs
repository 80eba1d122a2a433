mod builder;
mod config;
mod error;
pub mod headers;
mod merge;
mod response;
mod slot;

pub use builder::CorsBuilder;
pub use config::{CorsConfig, CorsMode, HeaderField, InfoHeader, TimeUnit};
pub use error::CorsConfigError;
pub use merge::{merge_header_values, split_tokens};
pub use response::ResponseHeaders;
pub use slot::CorsSlot;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::middleware::Middleware;
use headers::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
};

/// CORS (Cross-Origin Resource Sharing) response header interceptor
///
/// Writes the headers of the configuration installed in its [`CorsSlot`] to
/// every response it sees. By default it reads the process-wide slot that
/// `CorsBuilder::build()` installs into; if nothing was ever installed, the
/// default header set is installed on the first response.
///
/// # Header decisions
///
/// For origin, methods, headers, expose-headers and the info header, in that
/// order (info header last, after credentials and max-age):
/// - unset or empty value: skipped
/// - header absent from the response: added
/// - header present, append flag off: overwritten
/// - header present, append flag on: set to the union of the existing and
///   configured tokens
///
/// Credentials and max-age are always written as plain values, overwriting
/// any existing header. A `Disabled` configuration writes nothing.
///
/// # Usage
///
/// ```rust
/// use std::sync::Arc;
///
/// use corsheaders::middleware::cors::{CorsBuilder, CorsMiddleware, CorsSlot};
///
/// let slot = Arc::new(CorsSlot::new());
/// CorsBuilder::builder()
///     .set_allow_origin("https://example.com")
///     .set_allow_methods("GET,POST")
///     .set_allow_credentials(true)
///     .build_into(&slot)
///     .unwrap();
///
/// let cors = CorsMiddleware::with_slot(slot);
/// let mut headers = http::HeaderMap::new();
/// cors.apply(&mut headers);
/// assert_eq!(headers.len(), 3);
/// assert_eq!(headers["access-control-allow-methods"], "GET,POST");
/// ```
#[derive(Debug, Clone)]
pub struct CorsMiddleware {
    slot: Arc<CorsSlot>,
}

impl CorsMiddleware {
    /// Interceptor reading the process-wide slot
    pub fn new() -> Self {
        Self {
            slot: CorsSlot::global(),
        }
    }

    /// Interceptor reading an injected slot
    ///
    /// Installing into `slot` later reconfigures this interceptor.
    pub fn with_slot(slot: Arc<CorsSlot>) -> Self {
        Self { slot }
    }

    /// Interceptor bound to a single, fixed configuration
    pub fn with_config(config: CorsConfig) -> Self {
        let slot = CorsSlot::without_lazy_default();
        slot.install(Arc::new(config));
        Self {
            slot: Arc::new(slot),
        }
    }

    pub fn slot(&self) -> &Arc<CorsSlot> {
        &self.slot
    }

    /// Write the configured CORS headers to `res`
    ///
    /// An empty slot without lazy default leaves `res` untouched.
    pub fn apply<R>(&self, res: &mut R)
    where
        R: ResponseHeaders + ?Sized,
    {
        match self.slot.resolve() {
            Some(config) => apply_config(&config, res),
            None => debug!("CORS: no configuration installed, forwarding untouched"),
        }
    }

    /// Write the configured CORS headers, then hand `res` to `next`
    ///
    /// `next` is called exactly once, whatever the configuration.
    pub fn intercept<R, F, T>(&self, res: &mut R, next: F) -> T
    where
        R: ResponseHeaders + ?Sized,
        F: FnOnce(&mut R) -> T,
    {
        self.apply(res);
        next(res)
    }
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the headers of `config` to `res`
pub fn apply_config<R>(config: &CorsConfig, res: &mut R)
where
    R: ResponseHeaders + ?Sized,
{
    if config.is_disabled() {
        debug!("CORS: disabled, skipping headers");
        return;
    }

    set_or_append_header(res, ACCESS_CONTROL_ALLOW_ORIGIN, false, config.allow_origin());
    set_or_append_header(
        res,
        ACCESS_CONTROL_ALLOW_METHODS,
        config.allow_methods.append(),
        config.allow_methods.value(),
    );
    set_or_append_header(
        res,
        ACCESS_CONTROL_ALLOW_HEADERS,
        config.allow_headers.append(),
        config.allow_headers.value(),
    );
    set_or_append_header(
        res,
        ACCESS_CONTROL_EXPOSE_HEADERS,
        config.expose_headers.append(),
        config.expose_headers.value(),
    );

    set_value_header(res, ACCESS_CONTROL_ALLOW_CREDENTIALS, config.allow_credentials);
    set_value_header(res, ACCESS_CONTROL_MAX_AGE, config.max_age);

    if let Some(info) = config.info_header() {
        set_or_append_header(res, info.name(), info.append(), Some(info.value()));
    }
}

fn set_or_append_header<R>(res: &mut R, name: &str, append: bool, value: Option<&str>)
where
    R: ResponseHeaders + ?Sized,
{
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return,
    };

    if !res.has_header(name) {
        debug!(header = %name, "CORS: adding header");
        res.add_header(name, value.to_string());
    } else if !append {
        debug!(header = %name, "CORS: overwriting header");
        res.set_header(name, value.to_string());
    } else {
        let existing = res.header_values(name);
        let merged = merge_header_values(existing.iter().map(String::as_str), value);
        debug!(header = %name, merged = %merged, "CORS: merging header");
        res.set_header(name, merged);
    }
}

fn set_value_header<R, T>(res: &mut R, name: &str, value: Option<T>)
where
    R: ResponseHeaders + ?Sized,
    T: ToString,
{
    let Some(value) = value else {
        return;
    };
    let value = value.to_string();
    if res.has_header(name) {
        res.set_header(name, value);
    } else {
        res.add_header(name, value);
    }
}

impl Middleware for CorsMiddleware {
    /// Write CORS headers after the handler ran
    ///
    /// Headers the handler set are visible here, so append-flagged fields
    /// merge into them.
    fn after(&self, _req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        self.apply(res);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::HeaderVec;
    use serde_json::Value;

    fn response() -> HandlerResponse {
        HandlerResponse::new(200, HeaderVec::new(), Value::Null)
    }

    fn fixed(builder: CorsBuilder) -> CorsMiddleware {
        CorsMiddleware::with_config(builder.finish().unwrap())
    }

    #[test]
    fn test_default_headers_on_empty_response() {
        let cors = CorsMiddleware::with_slot(Arc::new(CorsSlot::new()));
        let mut res = response();
        cors.apply(&mut res);

        assert_eq!(res.headers.len(), 6);
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        assert_eq!(
            res.get_header(ACCESS_CONTROL_ALLOW_METHODS),
            Some("GET,POST,PUT,DELETE,OPTIONS,HEAD,PATCH")
        );
        assert_eq!(
            res.get_header(ACCESS_CONTROL_ALLOW_HEADERS),
            Some("Origin,Accept,Content-Type")
        );
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_CREDENTIALS), Some("true"));
        assert_eq!(res.get_header(ACCESS_CONTROL_MAX_AGE), Some("86400"));
        assert_eq!(res.get_header("X-CORS-Headers"), Some("Powered-by-CorsHeaders"));
        assert_eq!(res.get_header(ACCESS_CONTROL_EXPOSE_HEADERS), None);
    }

    #[test]
    fn test_write_order() {
        let cors = fixed(
            CorsBuilder::builder()
                .set_info_header("X-Info", "i")
                .set_max_age(1, TimeUnit::Seconds)
                .set_allow_credentials(false)
                .set_expose_headers("E")
                .set_allow_headers("H")
                .set_allow_methods("M")
                .set_allow_origin("O"),
        );
        let mut res = response();
        cors.apply(&mut res);
        let names: Vec<&str> = res.headers.iter().map(|(k, _)| k.as_ref()).collect();
        assert_eq!(
            names,
            vec![
                ACCESS_CONTROL_ALLOW_ORIGIN,
                ACCESS_CONTROL_ALLOW_METHODS,
                ACCESS_CONTROL_ALLOW_HEADERS,
                ACCESS_CONTROL_EXPOSE_HEADERS,
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                ACCESS_CONTROL_MAX_AGE,
                "X-Info",
            ]
        );
    }

    #[test]
    fn test_disabled_leaves_response_untouched() {
        let cors = CorsMiddleware::with_config(CorsConfig::disabled());
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_ORIGIN, "https://a.example".into());
        cors.apply(&mut res);
        assert_eq!(res.headers.len(), 1);
        assert_eq!(
            res.get_header(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("https://a.example")
        );
        for name in headers::CORS_RESPONSE_HEADERS.iter().skip(1) {
            assert!(!res.has_header(name), "{name} written while disabled");
        }
    }

    #[test]
    fn test_empty_slot_without_lazy_default_is_noop() {
        let cors = CorsMiddleware::with_slot(Arc::new(CorsSlot::without_lazy_default()));
        let mut res = response();
        cors.apply(&mut res);
        assert!(res.headers.is_empty());
    }

    #[test]
    fn test_existing_header_overwritten_without_append() {
        let cors = fixed(CorsBuilder::builder().set_allow_methods("B"));
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_METHODS, "A".into());
        cors.apply(&mut res);
        assert_eq!(
            res.get_header_values(ACCESS_CONTROL_ALLOW_METHODS)
                .collect::<Vec<_>>(),
            vec!["B"]
        );
    }

    #[test]
    fn test_existing_header_merged_with_append() {
        let cors = fixed(CorsBuilder::builder().append_allow_methods("B,C"));
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_METHODS, "A,B".into());
        cors.apply(&mut res);
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_METHODS), Some("A,B,C"));
        assert_eq!(res.get_header_values(ACCESS_CONTROL_ALLOW_METHODS).count(), 1);
    }

    #[test]
    fn test_append_merges_every_existing_value() {
        let cors = fixed(CorsBuilder::builder().append_expose_headers("X-B"));
        let mut res = response();
        res.add_header("access-control-expose-headers", "X-A".into());
        res.add_header("Access-Control-Expose-Headers", "X-C, X-B".into());
        cors.apply(&mut res);
        assert_eq!(
            res.get_header(ACCESS_CONTROL_EXPOSE_HEADERS),
            Some("X-A,X-C,X-B")
        );
    }

    #[test]
    fn test_origin_always_overwrites() {
        let cors = fixed(CorsBuilder::builder().set_allow_origin("https://b.example"));
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_ORIGIN, "https://a.example".into());
        cors.apply(&mut res);
        assert_eq!(
            res.get_header(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("https://b.example")
        );
    }

    #[test]
    fn test_value_headers_overwrite() {
        let cors = fixed(
            CorsBuilder::builder()
                .set_allow_credentials(false)
                .set_max_age(10, TimeUnit::Minutes),
        );
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".into());
        res.add_header(ACCESS_CONTROL_MAX_AGE, "5".into());
        cors.apply(&mut res);
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_CREDENTIALS), Some("false"));
        assert_eq!(res.get_header(ACCESS_CONTROL_MAX_AGE), Some("600"));
        assert_eq!(res.headers.len(), 2);
    }

    #[test]
    fn test_info_header_append() {
        let cors = fixed(CorsBuilder::builder().append_info_header("X-Info", "b"));
        let mut res = response();
        res.add_header("x-info", "a".into());
        cors.apply(&mut res);
        assert_eq!(res.get_header("X-Info"), Some("a,b"));
    }

    #[test]
    fn test_append_on_header_map_keeps_non_ascii_tokens() {
        let cors = fixed(CorsBuilder::builder().append_info_header("X-Info", "b"));
        let mut headers = http::HeaderMap::new();
        headers.append(
            "x-info",
            http::HeaderValue::from_bytes("café".as_bytes()).unwrap(),
        );
        headers.append("x-info", http::HeaderValue::from_static("a"));
        cors.apply(&mut headers);
        let values: Vec<_> = headers.get_all("x-info").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].as_bytes(), "café,a,b".as_bytes());
    }

    #[test]
    fn test_only_origin_writes_one_header() {
        let cors = fixed(CorsBuilder::builder().set_allow_origin("https://example.com"));
        let mut res = response();
        cors.apply(&mut res);
        assert_eq!(res.headers.len(), 1);
    }

    #[test]
    fn test_empty_values_never_written() {
        let cors = fixed(
            CorsBuilder::builder()
                .set_allow_origin("")
                .append_allow_methods("")
                .set_allow_headers_list(&[]),
        );
        let mut res = response();
        res.add_header(ACCESS_CONTROL_ALLOW_METHODS, "GET".into());
        cors.apply(&mut res);
        assert_eq!(res.headers.len(), 1);
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_METHODS), Some("GET"));
    }

    #[test]
    fn test_intercept_calls_next_once() {
        for cors in [
            CorsMiddleware::with_config(CorsConfig::disabled()),
            CorsMiddleware::with_config(CorsConfig::default_set()),
            CorsMiddleware::with_slot(Arc::new(CorsSlot::without_lazy_default())),
        ] {
            let mut res = response();
            let mut calls = 0;
            cors.intercept(&mut res, |_| calls += 1);
            assert_eq!(calls, 1);
        }
    }

    #[test]
    fn test_reinstall_reconfigures_interceptor() {
        let slot = Arc::new(CorsSlot::new());
        let cors = CorsMiddleware::with_slot(Arc::clone(&slot));

        CorsBuilder::disabled().build_into(&slot).unwrap();
        let mut res = response();
        cors.apply(&mut res);
        assert!(res.headers.is_empty());

        CorsBuilder::builder()
            .set_allow_origin("*")
            .build_into(&slot)
            .unwrap();
        cors.apply(&mut res);
        assert_eq!(res.get_header(ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
    }
}
