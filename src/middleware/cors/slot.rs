use std::sync::Arc;

use arc_swap::{ArcSwapOption, Guard};
use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::CorsConfig;

static GLOBAL_SLOT: Lazy<Arc<CorsSlot>> = Lazy::new(|| Arc::new(CorsSlot::new()));

/// Holder for the currently installed CORS configuration
///
/// Installing swaps the whole `Arc<CorsConfig>` atomically; readers on the
/// request path load it without locking and never see a partially built
/// configuration. One slot is shared process-wide ([`CorsSlot::global`]);
/// private slots can be created and handed to `CorsMiddleware::with_slot`.
#[derive(Debug)]
pub struct CorsSlot {
    current: ArcSwapOption<CorsConfig>,
    lazy_default: bool,
}

impl CorsSlot {
    /// Empty slot that installs the default configuration on first use
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            lazy_default: true,
        }
    }

    /// Empty slot that stays empty until something is installed
    ///
    /// An interceptor reading from it forwards responses untouched.
    pub fn without_lazy_default() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            lazy_default: false,
        }
    }

    /// The process-wide slot written by `CorsBuilder::build()`
    pub fn global() -> Arc<CorsSlot> {
        Arc::clone(&GLOBAL_SLOT)
    }

    /// Replace the installed configuration, returning the previous one
    pub fn install(&self, config: Arc<CorsConfig>) -> Option<Arc<CorsConfig>> {
        info!(mode = %config.mode(), "CORS configuration installed");
        self.current.swap(Some(config))
    }

    /// Remove the installed configuration, returning it
    pub fn clear(&self) -> Option<Arc<CorsConfig>> {
        self.current.swap(None)
    }

    /// Installed configuration, without triggering the lazy default
    pub fn current(&self) -> Option<Arc<CorsConfig>> {
        self.current.load_full()
    }

    /// Configuration to apply to the next response
    ///
    /// On an empty slot with lazy default enabled, the default configuration
    /// is installed first. A configuration installed concurrently wins over
    /// the lazy default.
    pub fn resolve(&self) -> Option<Arc<CorsConfig>> {
        if let Some(config) = self.current.load_full() {
            return Some(config);
        }
        if !self.lazy_default {
            return None;
        }

        let default = Arc::new(CorsConfig::default_set());
        let previous = self
            .current
            .compare_and_swap(&None::<Arc<CorsConfig>>, Some(Arc::clone(&default)));
        match Guard::into_inner(previous) {
            Some(existing) => Some(existing),
            None => {
                debug!("no CORS configuration installed, using defaults");
                Some(default)
            }
        }
    }
}

impl Default for CorsSlot {
    fn default() -> Self {
        Self::new()
    }
}
