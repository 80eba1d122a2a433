//! CORS response header names and default values.
//!
//! The `http` crate has no pre-defined constants for the CORS response
//! headers in canonical case, so they live here.

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";

/// Every standard header the interceptor may write, in write order
pub const CORS_RESPONSE_HEADERS: [&str; 6] = [
    ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_EXPOSE_HEADERS,
    ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_MAX_AGE,
];

/// Default values used by `CorsBuilder::default_cors()`
pub mod defaults {
    pub const ALLOW_ORIGIN: &str = "*";
    pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS,HEAD,PATCH";
    pub const ALLOW_HEADERS: &str = "Origin,Accept,Content-Type";
    pub const ALLOW_CREDENTIALS: bool = true;
    /// 24 hours
    pub const MAX_AGE_SECS: u64 = 86_400;
    pub const INFO_HEADER_NAME: &str = "X-CORS-Headers";
    pub const INFO_HEADER_VALUE: &str = "Powered-by-CorsHeaders";
}

/// Render a header name in canonical `Title-Case` form.
///
/// `http::HeaderName` always stores names lowercased; responses written by
/// this crate use the conventional casing (`content-type` -> `Content-Type`).
pub fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
