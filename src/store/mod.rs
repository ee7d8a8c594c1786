//! Storage seam. The upstream REST service is the system of record; the
//! gateway talks to it through these traits so tests can swap in the
//! array-backed fake.

pub mod memory;
pub mod query;
pub mod upstream;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Endpoint, EndpointItem};
use crate::model::endpoint::EndpointDraft;

pub use memory::MemoryStore;
pub use upstream::UpstreamStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Upstream answered non-2xx. Status is forwarded verbatim to callers.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream answered 2xx but the body was unparseable or missing
    /// required fields.
    #[error("invalid upstream response: {0}")]
    Protocol(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Endpoint schema registry operations.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, StoreError>;

    async fn create_endpoint(
        &self,
        token: &str,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError>;

    /// Fetch one endpoint. When the upstream embeds its items the result's
    /// `items` is populated; callers fall back to [`ItemStore::items_by_endpoint`]
    /// otherwise.
    async fn fetch_endpoint(&self, id: &str) -> Result<Endpoint, StoreError>;

    /// 1:1 passthrough update; the patch body is forwarded as received.
    async fn update_endpoint(
        &self,
        token: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Endpoint, StoreError>;

    /// Deleting an endpoint cascades to its items (enforced by the store,
    /// not by this layer).
    async fn delete_endpoint(&self, token: &str, id: &str) -> Result<(), StoreError>;
}

/// Item operations. Items are addressed flat — the endpoint association is a
/// field on the item, not part of its address.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Filtered query for an endpoint's items, capped at the configured
    /// limit. The one shared implementation behind both the list route and
    /// the embedded-items fallback.
    async fn items_by_endpoint(
        &self,
        token: Option<&str>,
        endpoint_id: &str,
    ) -> Result<Vec<EndpointItem>, StoreError>;

    async fn create_item(
        &self,
        token: &str,
        endpoint_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError>;

    async fn fetch_item(&self, item_id: &str) -> Result<EndpointItem, StoreError>;

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError>;

    async fn delete_item(&self, token: &str, item_id: &str) -> Result<(), StoreError>;
}
