//! Everything touching the process-wide slot lives in this one test so that
//! parallel test threads never race on it.

use corsheaders::{
    dispatcher::{HandlerResponse, HeaderVec},
    middleware::cors::{CorsBuilder, CorsConfig, CorsMiddleware, CorsMode, CorsSlot},
};
use serde_json::Value;

fn response() -> HandlerResponse {
    HandlerResponse::new(200, HeaderVec::new(), Value::Null)
}

#[test]
fn test_global_slot_lifecycle() {
    let global = CorsSlot::global();
    assert!(global.current().is_none());

    // First response without any install gets the default set
    let cors = CorsMiddleware::new();
    let mut res = response();
    cors.apply(&mut res);
    assert_eq!(res.headers.len(), 6);
    assert_eq!(
        global.current().as_deref(),
        Some(&CorsConfig::default_set())
    );

    // build() replaces the lazily installed default
    let installed = CorsBuilder::builder()
        .set_allow_origin("https://example.com")
        .build()
        .unwrap();
    assert_eq!(installed.mode(), CorsMode::Custom);
    let mut res = response();
    cors.apply(&mut res);
    assert_eq!(res.headers.len(), 1);
    assert_eq!(
        res.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );

    // Interceptors created later observe the same slot
    let later = CorsMiddleware::default();
    CorsBuilder::disabled().build().unwrap();
    let mut res = response();
    later.apply(&mut res);
    assert!(res.headers.is_empty());

    // A rejected build leaves the previous configuration in place
    assert!(CorsBuilder::builder()
        .set_allow_methods("GET\r\nX-Injected: 1")
        .build()
        .is_err());
    assert!(global.current().unwrap().is_disabled());
}
