use std::sync::Arc;

use crate::auth::gateway::UpstreamAuthGateway;
use crate::auth::AuthService;
use crate::store::{EndpointStore, ItemStore, UpstreamStore};

/// Injected collaborators shared by every handler. Production wires the live
/// upstream proxies; tests wire the in-memory fake and a stub auth service.
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<dyn EndpointStore>,
    pub items: Arc<dyn ItemStore>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    pub fn new(
        endpoints: Arc<dyn EndpointStore>,
        items: Arc<dyn ItemStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self { endpoints, items, auth }
    }

    /// Production wiring from the config singleton.
    pub fn upstream() -> Self {
        let store = Arc::new(UpstreamStore::from_config());
        Self {
            endpoints: store.clone(),
            items: store,
            auth: Arc::new(UpstreamAuthGateway::from_config()),
        }
    }
}
