use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Response;
use tracing::warn;

use crate::dispatcher::HandlerResponse;

/// Response header access needed by `CorsMiddleware`
///
/// Header names are matched case-insensitively. `add_header` appends another
/// value for the name; `set_header` replaces every existing value.
pub trait ResponseHeaders {
    fn has_header(&self, name: &str) -> bool;
    fn header_values(&self, name: &str) -> Vec<String>;
    fn add_header(&mut self, name: &str, value: String);
    fn set_header(&mut self, name: &str, value: String);
}

fn to_header_pair(name: &str, value: String) -> Option<(HeaderName, HeaderValue)> {
    let header_name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(n) => n,
        Err(_) => {
            warn!(header = %name, "CORS: skipping write, invalid header name");
            return None;
        }
    };
    match HeaderValue::try_from(value) {
        Ok(v) => Some((header_name, v)),
        Err(_) => {
            warn!(header = %name, "CORS: skipping write, invalid header value");
            None
        }
    }
}

impl ResponseHeaders for HeaderMap {
    fn has_header(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect()
    }

    fn add_header(&mut self, name: &str, value: String) {
        if let Some((name, value)) = to_header_pair(name, value) {
            self.append(name, value);
        }
    }

    fn set_header(&mut self, name: &str, value: String) {
        if let Some((name, value)) = to_header_pair(name, value) {
            self.insert(name, value);
        }
    }
}

impl<B> ResponseHeaders for Response<B> {
    fn has_header(&self, name: &str) -> bool {
        self.headers().has_header(name)
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.headers().header_values(name)
    }

    fn add_header(&mut self, name: &str, value: String) {
        self.headers_mut().add_header(name, value);
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers_mut().set_header(name, value);
    }
}

impl ResponseHeaders for HandlerResponse {
    fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.get_header_values(name).map(str::to_owned).collect()
    }

    fn add_header(&mut self, name: &str, value: String) {
        HandlerResponse::add_header(self, name, value);
    }

    fn set_header(&mut self, name: &str, value: String) {
        HandlerResponse::set_header(self, name, value);
    }
}
