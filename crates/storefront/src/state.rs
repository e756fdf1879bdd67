//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StorefrontConfig;
use crate::gemini::GeminiClient;
use crate::sessions::FlowRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the Gemini client and the order-flow registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    gemini: GeminiClient,
    flows: FlowRegistry,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let gemini = GeminiClient::new(&config.gemini);
        let flows = FlowRegistry::new(
            config.vat_rate,
            Duration::from_secs(config.session_ttl_minutes * 60),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                gemini,
                flows,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Gemini API client.
    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Get a reference to the order-flow registry.
    #[must_use]
    pub fn flows(&self) -> &FlowRegistry {
        &self.inner.flows
    }
}
