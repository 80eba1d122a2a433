use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::Method;
use tracing::{debug, warn};

use super::headers::{
    canonical_name, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};
use super::{
    merge_header_values, CorsConfig, CorsConfigError, CorsMode, CorsSlot, HeaderField,
    InfoHeader, TimeUnit,
};

/// Builder for `CorsConfig` with a fluent API
///
/// Start from one of three entry points:
/// - [`CorsBuilder::default_cors`] - the built-in header set
/// - [`CorsBuilder::builder`] - an empty custom set
/// - [`CorsBuilder::disabled`] - no headers at all
///
/// List-valued fields have a `set_*` variant (overwrite an existing response
/// header) and an `append_*` variant (merge into an existing response
/// header). Origin, credentials and max-age are set-only.
///
/// `build()` freezes the configuration and installs it process-wide; every
/// response intercepted afterwards uses it.
///
/// # Example
///
/// ```rust
/// use corsheaders::middleware::cors::{CorsBuilder, TimeUnit};
/// use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
/// use http::Method;
///
/// let config = CorsBuilder::builder()
///     .set_allow_origin("*")
///     .set_allow_methods_list(&[Method::GET, Method::POST])
///     .set_allow_headers_list(&[ORIGIN, ACCEPT, CONTENT_TYPE])
///     .set_expose_headers("X-My-Header1, X-My-Header2")
///     .set_allow_credentials(true)
///     .set_max_age(12, TimeUnit::Hours)
///     .set_info_header("X-My-Header", "My_Info")
///     .finish()
///     .unwrap();
///
/// assert_eq!(config.max_age(), Some(43_200));
/// ```
#[derive(Debug, Clone)]
pub struct CorsBuilder {
    config: CorsConfig,
}

impl CorsBuilder {
    /// Start from the default header set
    ///
    /// Calling any setter switches the mode to `Custom`, keeping the
    /// remaining defaults.
    pub fn default_cors() -> Self {
        Self {
            config: CorsConfig::default_set(),
        }
    }

    /// Start an empty custom header set
    pub fn builder() -> Self {
        Self {
            config: CorsConfig::empty(CorsMode::Custom),
        }
    }

    /// Disable CORS headers
    ///
    /// Setters still record values, but a disabled configuration never
    /// writes them.
    pub fn disabled() -> Self {
        Self {
            config: CorsConfig::disabled(),
        }
    }

    /// Mode the built configuration will have
    pub fn mode(&self) -> CorsMode {
        self.config.mode
    }

    fn customize(&mut self) {
        if self.config.mode == CorsMode::Default {
            self.config.mode = CorsMode::Custom;
        }
    }

    /// Set `Access-Control-Allow-Origin`
    ///
    /// Origin is single-valued and always overwrites an existing header.
    pub fn set_allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.customize();
        self.config.allow_origin = Some(origin.into());
        self
    }

    /// Set `Access-Control-Allow-Methods` (e.g., `"GET,POST"`)
    pub fn set_allow_methods(mut self, methods: &str) -> Self {
        self.customize();
        self.config.allow_methods = HeaderField::set(methods);
        self
    }

    /// Append to `Access-Control-Allow-Methods`
    pub fn append_allow_methods(mut self, methods: &str) -> Self {
        self.customize();
        append_field(&mut self.config.allow_methods, methods);
        self
    }

    pub fn set_allow_methods_list(self, methods: &[Method]) -> Self {
        let joined = join_methods(methods);
        self.set_allow_methods(&joined)
    }

    pub fn append_allow_methods_list(self, methods: &[Method]) -> Self {
        let joined = join_methods(methods);
        self.append_allow_methods(&joined)
    }

    /// Set `Access-Control-Allow-Headers` (e.g., `"Origin,Accept"`)
    pub fn set_allow_headers(mut self, headers: &str) -> Self {
        self.customize();
        self.config.allow_headers = HeaderField::set(headers);
        self
    }

    /// Append to `Access-Control-Allow-Headers`
    pub fn append_allow_headers(mut self, headers: &str) -> Self {
        self.customize();
        append_field(&mut self.config.allow_headers, headers);
        self
    }

    pub fn set_allow_headers_list(self, headers: &[HeaderName]) -> Self {
        let joined = join_header_names(headers);
        self.set_allow_headers(&joined)
    }

    pub fn append_allow_headers_list(self, headers: &[HeaderName]) -> Self {
        let joined = join_header_names(headers);
        self.append_allow_headers(&joined)
    }

    /// Set `Access-Control-Expose-Headers`
    pub fn set_expose_headers(mut self, headers: &str) -> Self {
        self.customize();
        self.config.expose_headers = HeaderField::set(headers);
        self
    }

    /// Append to `Access-Control-Expose-Headers`
    pub fn append_expose_headers(mut self, headers: &str) -> Self {
        self.customize();
        append_field(&mut self.config.expose_headers, headers);
        self
    }

    pub fn set_expose_headers_list(self, headers: &[HeaderName]) -> Self {
        let joined = join_header_names(headers);
        self.set_expose_headers(&joined)
    }

    pub fn append_expose_headers_list(self, headers: &[HeaderName]) -> Self {
        let joined = join_header_names(headers);
        self.append_expose_headers(&joined)
    }

    /// Set `Access-Control-Allow-Credentials`
    pub fn set_allow_credentials(mut self, allow: bool) -> Self {
        self.customize();
        self.config.allow_credentials = Some(allow);
        self
    }

    /// Set `Access-Control-Max-Age`, stored in seconds
    ///
    /// `set_max_age(12, TimeUnit::Hours)` writes `Access-Control-Max-Age: 43200`.
    pub fn set_max_age(mut self, value: u64, unit: TimeUnit) -> Self {
        self.customize();
        self.config.max_age = Some(unit.to_seconds(value));
        self
    }

    /// Set `Access-Control-Max-Age` from a `Duration` (whole seconds)
    pub fn set_max_age_duration(self, max_age: Duration) -> Self {
        self.set_max_age(max_age.as_secs(), TimeUnit::Seconds)
    }

    /// Set the informational header, overwriting an existing one on the response
    pub fn set_info_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.customize();
        self.config.info_header = Some(InfoHeader {
            name: name.into(),
            value: value.into(),
            append: false,
        });
        self
    }

    /// Set the informational header, merging into an existing one on the response
    ///
    /// Appending twice under the same name unions the values.
    pub fn append_info_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.customize();
        let name = name.into();
        let value = value.into();
        let value = match &self.config.info_header {
            Some(existing) if existing.name.eq_ignore_ascii_case(&name) => {
                merge_header_values([existing.value.as_str()], &value)
            }
            _ => value,
        };
        self.config.info_header = Some(InfoHeader {
            name,
            value,
            append: true,
        });
        self
    }

    /// Validate and freeze the configuration without installing it
    ///
    /// # Errors
    ///
    /// - `CorsConfigError::InvalidHeaderName` if the info header name is not
    ///   a valid HTTP header name
    /// - `CorsConfigError::InvalidHeaderValue` if any value contains bytes
    ///   that cannot appear in a header value
    pub fn finish(self) -> Result<CorsConfig, CorsConfigError> {
        let config = self.config;

        check_value(ACCESS_CONTROL_ALLOW_ORIGIN, config.allow_origin.as_deref())?;
        check_value(ACCESS_CONTROL_ALLOW_METHODS, config.allow_methods.value.as_deref())?;
        check_value(ACCESS_CONTROL_ALLOW_HEADERS, config.allow_headers.value.as_deref())?;
        check_value(ACCESS_CONTROL_EXPOSE_HEADERS, config.expose_headers.value.as_deref())?;
        if let Some(info) = &config.info_header {
            if HeaderName::from_bytes(info.name.as_bytes()).is_err() {
                return Err(CorsConfigError::InvalidHeaderName {
                    name: info.name.clone(),
                });
            }
            check_value(&info.name, Some(info.value.as_str()))?;
        }

        if !config.is_disabled()
            && config.allow_credentials == Some(true)
            && config.allow_origin() == Some("*")
        {
            warn!(
                "CORS: wildcard origin (*) combined with credentials; \
                browsers reject credentialed responses with a wildcard origin"
            );
        }

        debug!(mode = %config.mode, "CORS configuration built");
        Ok(config)
    }

    /// Freeze the configuration and install it process-wide
    ///
    /// Replaces any previously installed configuration for all subsequent
    /// requests.
    ///
    /// # Errors
    ///
    /// See [`CorsBuilder::finish`]. Nothing is installed on error.
    pub fn build(self) -> Result<Arc<CorsConfig>, CorsConfigError> {
        self.build_into(&CorsSlot::global())
    }

    /// Freeze the configuration and install it into `slot`
    ///
    /// # Errors
    ///
    /// See [`CorsBuilder::finish`]. Nothing is installed on error.
    pub fn build_into(self, slot: &CorsSlot) -> Result<Arc<CorsConfig>, CorsConfigError> {
        let config = Arc::new(self.finish()?);
        slot.install(Arc::clone(&config));
        Ok(config)
    }
}

impl Default for CorsBuilder {
    fn default() -> Self {
        Self::builder()
    }
}

fn append_field(field: &mut HeaderField, value: &str) {
    let merged = match field.value.as_deref() {
        Some(existing) if !existing.is_empty() => merge_header_values([existing], value),
        _ => value.to_string(),
    };
    field.value = Some(merged);
    field.append = true;
}

fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn join_header_names(headers: &[HeaderName]) -> String {
    headers
        .iter()
        .map(|h| canonical_name(h.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

fn check_value(header: &str, value: Option<&str>) -> Result<(), CorsConfigError> {
    match value {
        Some(v) if HeaderValue::from_str(v).is_err() => Err(CorsConfigError::InvalidHeaderValue {
            header: header.to_string(),
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}
