//! # corsheaders
//!
//! **corsheaders** writes CORS (Cross-Origin Resource Sharing) response
//! headers from one process-wide configuration, with per-field control over
//! whether a configured value replaces a header already on the response or is
//! merged into it.
//!
//! ## Architecture
//!
//! - **[`middleware::cors`]** - Configuration model, fluent builder, header
//!   merging and the response interceptor
//! - **[`dispatcher`]** - Minimal request/response pipeline running middleware
//!   before and after a handler
//! - **[`settings`]** - YAML/JSON settings files mapped onto the builder
//! - **[`runtime_config`]** - Environment-driven startup configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `corsheaders` command-line tool
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Builder as CorsBuilder
//!     participant Slot as CorsSlot
//!     participant Cors as CorsMiddleware
//!     participant Handler
//!
//!     App->>Builder: default_cors() / builder() / disabled()
//!     Builder->>Slot: build() installs Arc<CorsConfig>
//!     App->>Handler: dispatch(request)
//!     Handler-->>Cors: after(&req, &mut res)
//!     Cors->>Slot: resolve() (lazy default if empty)
//!     Cors->>Cors: add / overwrite / merge each header
//!     Cors-->>App: response with CORS headers
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use corsheaders::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse, HeaderVec};
//! use corsheaders::middleware::{CorsBuilder, CorsMiddleware};
//! use http::Method;
//! use std::sync::Arc;
//!
//! let config = CorsBuilder::builder()
//!     .set_allow_origin("https://example.com")
//!     .set_allow_methods("GET,POST")
//!     .set_allow_credentials(true)
//!     .finish()
//!     .unwrap();
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.add_middleware(Arc::new(CorsMiddleware::with_config(config)));
//!
//! let req = HandlerRequest::new(Method::GET, "/pets", HeaderVec::new());
//! let res = dispatcher.dispatch(&req, |_| HandlerResponse::json(200, serde_json::json!([])));
//! assert_eq!(res.get_header("access-control-allow-origin"), Some("https://example.com"));
//! ```
//!
//! ## Process-wide Configuration
//!
//! `CorsBuilder::build()` publishes the configuration to a global slot that
//! every `CorsMiddleware::new()` reads. Installing again replaces it
//! atomically; in-flight responses finish with the configuration they
//! loaded. If nothing was installed, the default header set is installed on
//! the first response.
//!
//! ## Environment Variables
//!
//! - `CORSH_CONFIG` - settings file loaded by [`runtime_config::RuntimeConfig`]
//! - `CORSH_LOG_LEVEL` - log level (default: `info`)
//! - `CORSH_LOG_FORMAT` - `json` or `pretty` (default: `json`)

pub mod cli;
pub mod dispatcher;
pub mod logging;
pub mod middleware;
pub mod runtime_config;
pub mod settings;

pub use middleware::cors::{
    CorsBuilder, CorsConfig, CorsConfigError, CorsMiddleware, CorsMode, CorsSlot, TimeUnit,
};
