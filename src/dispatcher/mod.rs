//! # Dispatcher Module
//!
//! Minimal request pipeline hosting the middleware chain.
//!
//! A host application converts its own request into a [`HandlerRequest`],
//! calls [`Dispatcher::dispatch`] with a handler closure and writes the
//! returned [`HandlerResponse`] back to the client. Middleware registered with
//! [`Dispatcher::add_middleware`] sees every request before the handler and
//! every response after it.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use corsheaders::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse, HeaderVec};
//! use corsheaders::middleware::cors::{CorsMiddleware, CorsSlot};
//! use http::Method;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.add_middleware(Arc::new(CorsMiddleware::with_slot(Arc::new(CorsSlot::new()))));
//!
//! let req = HandlerRequest::new(Method::GET, "/pets", HeaderVec::new());
//! let resp = dispatcher.dispatch(&req, |_| HandlerResponse::json(200, serde_json::json!([])));
//! assert_eq!(resp.get_header("access-control-allow-origin"), Some("*"));
//! ```

mod core;

pub use self::core::{Dispatcher, HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};
