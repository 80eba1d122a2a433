use std::fmt;

/// CORS configuration error
///
/// Returned by `CorsBuilder::build()` when a configured header name or value
/// cannot be written to an HTTP response. Token syntax is not checked; only
/// wire legality is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsConfigError {
    /// The info header name is empty or not a valid HTTP header name
    InvalidHeaderName {
        /// The rejected header name
        name: String,
    },
    /// A configured value contains bytes that are illegal in a header value
    ///
    /// Control characters (CR, LF, NUL, DEL, ...) other than horizontal tab
    /// are rejected.
    InvalidHeaderValue {
        /// Header the value was configured for
        header: String,
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for CorsConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsConfigError::InvalidHeaderName { name } => {
                write!(
                    f,
                    "CORS configuration error: Invalid header name '{}'. \
                    Header names must be non-empty HTTP tokens (e.g., X-My-Header)",
                    name
                )
            }
            CorsConfigError::InvalidHeaderValue { header, value } => {
                write!(
                    f,
                    "CORS configuration error: Invalid value {:?} for header '{}'. \
                    Control characters (CR, LF, NUL, ...) are not allowed.",
                    value, header
                )
            }
        }
    }
}

impl std::error::Error for CorsConfigError {}
