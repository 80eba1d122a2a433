use std::time::Duration;

use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Hook into the `Dispatcher` request pipeline
///
/// `before` may return an early response, which skips the handler. `after`
/// runs for every response, early or not, and may modify it in place.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
