//! Customer session plumbing.
//!
//! The session cookie carries only a flow id; the lifecycle state itself
//! lives in an in-process registry and expires on inactivity. Each flow is
//! wrapped in a `Mutex` so all transitions for one session apply serially,
//! whatever the rendering layer does.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;

use ventanas_perfectas_core::flow::OrderFlow;
use ventanas_perfectas_core::pricing::PricingTables;

use crate::error::AppError;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vp_session";

/// Session keys.
pub mod session_keys {
    /// Key for the id of the session's order flow.
    pub const FLOW_ID: &str = "flow_id";
}

/// Create the session layer with the in-memory store.
///
/// State is deliberately not persisted; an expired or restarted process
/// simply hands the customer a fresh configurator.
#[must_use]
pub fn create_session_layer(ttl_minutes: u64) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::minutes(i64::try_from(ttl_minutes).unwrap_or(120)),
        ))
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Registry of live order flows, keyed by the flow id in the session cookie.
#[derive(Clone)]
pub struct FlowRegistry {
    flows: moka::future::Cache<Uuid, Arc<Mutex<OrderFlow>>>,
    vat_rate: f64,
}

impl FlowRegistry {
    /// Create a registry whose flows idle-expire after `ttl`.
    ///
    /// Every new flow snapshots the default pricing tables and the
    /// configured VAT rate.
    #[must_use]
    pub fn new(vat_rate: f64, ttl: Duration) -> Self {
        let flows = moka::future::Cache::builder().time_to_idle(ttl).build();
        Self { flows, vat_rate }
    }

    /// Look up a flow, creating a fresh one if the id is unknown (new
    /// session, or an expired one coming back).
    pub async fn get_or_create(&self, id: Uuid) -> Arc<Mutex<OrderFlow>> {
        let vat_rate = self.vat_rate;
        self.flows
            .get_with(id, async move {
                Arc::new(Mutex::new(OrderFlow::new(PricingTables::default(), vat_rate)))
            })
            .await
    }
}

/// Resolve the order flow for a request's session.
///
/// Assigns a fresh flow id to sessions that don't carry one yet.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn session_flow(
    session: &Session,
    registry: &FlowRegistry,
) -> Result<Arc<Mutex<OrderFlow>>, AppError> {
    let id = match session.get::<Uuid>(session_keys::FLOW_ID).await? {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4();
            session.insert(session_keys::FLOW_ID, id).await?;
            id
        }
    };

    Ok(registry.get_or_create(id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ventanas_perfectas_core::WindowConfig;
    use ventanas_perfectas_core::pricing::DEFAULT_VAT_RATE;

    #[tokio::test]
    async fn test_registry_returns_same_flow_for_same_id() {
        let registry = FlowRegistry::new(DEFAULT_VAT_RATE, Duration::from_secs(60));
        let id = Uuid::new_v4();

        let flow = registry.get_or_create(id).await;
        flow.lock()
            .await
            .add_to_cart(WindowConfig::default())
            .expect("add");

        let again = registry.get_or_create(id).await;
        assert_eq!(again.lock().await.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_registry_isolates_sessions() {
        let registry = FlowRegistry::new(DEFAULT_VAT_RATE, Duration::from_secs(60));

        let first = registry.get_or_create(Uuid::new_v4()).await;
        first
            .lock()
            .await
            .add_to_cart(WindowConfig::default())
            .expect("add");

        let second = registry.get_or_create(Uuid::new_v4()).await;
        assert!(second.lock().await.cart().is_empty());
    }
}
