use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::headers::defaults;

/// Which header set a configuration emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorsMode {
    /// The built-in header set (see [`CorsConfig::default_set`])
    #[default]
    Default,
    /// A header set assembled with `CorsBuilder`
    Custom,
    /// No CORS headers are ever written
    Disabled,
}

impl fmt::Display for CorsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorsMode::Default => "default",
            CorsMode::Custom => "custom",
            CorsMode::Disabled => "disabled",
        };
        f.write_str(s)
    }
}

/// Unit accepted by `CorsBuilder::set_max_age`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Number of seconds in one unit
    pub const fn seconds_factor(self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
        }
    }

    /// `value` units expressed in seconds, saturating at `u64::MAX`
    pub const fn to_seconds(self, value: u64) -> u64 {
        value.saturating_mul(self.seconds_factor())
    }
}

/// A comma-separated list header and its append flag
///
/// When `append` is `true` and the response already carries the header, the
/// configured tokens are merged into the existing ones instead of replacing
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderField {
    pub(crate) value: Option<String>,
    pub(crate) append: bool,
}

impl HeaderField {
    pub(crate) fn set(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            append: false,
        }
    }

    /// Configured value, `None` when unset or empty
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn append(&self) -> bool {
        self.append
    }
}

/// Free-form diagnostic header written alongside the CORS headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoHeader {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) append: bool,
}

impl InfoHeader {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn append(&self) -> bool {
        self.append
    }
}

/// Resolved, immutable CORS header configuration
///
/// Produced by `CorsBuilder` and shared behind an `Arc` once installed.
/// Fields left unset are never written to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub(crate) mode: CorsMode,
    pub(crate) allow_origin: Option<String>,
    pub(crate) allow_methods: HeaderField,
    pub(crate) allow_headers: HeaderField,
    pub(crate) expose_headers: HeaderField,
    pub(crate) allow_credentials: Option<bool>,
    pub(crate) max_age: Option<u64>,
    pub(crate) info_header: Option<InfoHeader>,
}

impl CorsConfig {
    /// The default header set
    ///
    /// - `Access-Control-Allow-Origin: *`
    /// - `Access-Control-Allow-Methods: GET,POST,PUT,DELETE,OPTIONS,HEAD,PATCH`
    /// - `Access-Control-Allow-Headers: Origin,Accept,Content-Type`
    /// - `Access-Control-Allow-Credentials: true`
    /// - `Access-Control-Max-Age: 86400`
    /// - `X-CORS-Headers: Powered-by-CorsHeaders`
    pub fn default_set() -> Self {
        Self {
            mode: CorsMode::Default,
            allow_origin: Some(defaults::ALLOW_ORIGIN.to_string()),
            allow_methods: HeaderField::set(defaults::ALLOW_METHODS),
            allow_headers: HeaderField::set(defaults::ALLOW_HEADERS),
            expose_headers: HeaderField::default(),
            allow_credentials: Some(defaults::ALLOW_CREDENTIALS),
            max_age: Some(defaults::MAX_AGE_SECS),
            info_header: Some(InfoHeader {
                name: defaults::INFO_HEADER_NAME.to_string(),
                value: defaults::INFO_HEADER_VALUE.to_string(),
                append: false,
            }),
        }
    }

    /// A configuration that writes nothing
    pub fn disabled() -> Self {
        Self::empty(CorsMode::Disabled)
    }

    pub(crate) fn empty(mode: CorsMode) -> Self {
        Self {
            mode,
            allow_origin: None,
            allow_methods: HeaderField::default(),
            allow_headers: HeaderField::default(),
            expose_headers: HeaderField::default(),
            allow_credentials: None,
            max_age: None,
            info_header: None,
        }
    }

    pub fn mode(&self) -> CorsMode {
        self.mode
    }

    pub fn is_disabled(&self) -> bool {
        self.mode == CorsMode::Disabled
    }

    pub fn allow_origin(&self) -> Option<&str> {
        self.allow_origin.as_deref().filter(|v| !v.is_empty())
    }

    pub fn allow_methods(&self) -> &HeaderField {
        &self.allow_methods
    }

    pub fn allow_headers(&self) -> &HeaderField {
        &self.allow_headers
    }

    pub fn expose_headers(&self) -> &HeaderField {
        &self.expose_headers
    }

    pub fn allow_credentials(&self) -> Option<bool> {
        self.allow_credentials
    }

    /// Preflight cache duration in seconds
    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }

    pub fn info_header(&self) -> Option<&InfoHeader> {
        self.info_header.as_ref()
    }
}
