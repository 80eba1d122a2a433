mod core;
pub mod cors;

pub use self::core::Middleware;
pub use cors::{CorsBuilder, CorsConfig, CorsMiddleware, CorsSlot};
