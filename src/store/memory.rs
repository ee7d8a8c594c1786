//! Array-backed in-memory store. Implements the same traits as the live
//! proxy so integration tests can run the full router without an upstream;
//! it also enforces the delete cascade the real service performs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::endpoint::EndpointDraft;
use crate::model::{Endpoint, EndpointItem};
use crate::store::{EndpointStore, ItemStore, StoreError};

#[derive(Default)]
struct Inner {
    endpoints: Vec<Endpoint>,
    items: Vec<EndpointItem>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }

    /// Seed an endpoint directly, bypassing validation. Test convenience.
    pub async fn seed_endpoint(&self, endpoint: Endpoint) {
        self.inner.write().await.endpoints.push(endpoint);
    }

    /// Seed an item directly. Test convenience.
    pub async fn seed_item(&self, item: EndpointItem) {
        self.inner.write().await.items.push(item);
    }
}

#[async_trait]
impl EndpointStore for MemoryStore {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, StoreError> {
        Ok(self.inner.read().await.endpoints.clone())
    }

    async fn create_endpoint(
        &self,
        _token: &str,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError> {
        let now = Utc::now();
        let endpoint = Endpoint {
            id: Self::next_id("ep"),
            title: draft.title.clone(),
            campos: draft.campos.clone(),
            created_at: Some(now),
            updated_at: Some(now),
            items: None,
        };
        self.inner.write().await.endpoints.push(endpoint.clone());
        Ok(endpoint)
    }

    async fn fetch_endpoint(&self, id: &str) -> Result<Endpoint, StoreError> {
        self.inner
            .read()
            .await
            .endpoints
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {id} not found")))
    }

    async fn update_endpoint(
        &self,
        _token: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Endpoint, StoreError> {
        let mut inner = self.inner.write().await;
        let endpoint = inner
            .endpoints
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {id} not found")))?;

        if let Some(title) = patch.get("title").and_then(Value::as_str) {
            endpoint.title = title.to_string();
        }
        if let Some(campos) = patch.get("campos") {
            endpoint.campos = serde_json::from_value(campos.clone())
                .map_err(|e| StoreError::Protocol(format!("update endpoint: {e}")))?;
        }
        endpoint.updated_at = Some(Utc::now());
        Ok(endpoint.clone())
    }

    async fn delete_endpoint(&self, _token: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.endpoints.len();
        inner.endpoints.retain(|e| e.id != id);
        if inner.endpoints.len() == before {
            return Err(StoreError::NotFound(format!("endpoint {id} not found")));
        }
        // cascade: items belonging to the endpoint go with it
        inner.items.retain(|item| item.endpoint_id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn items_by_endpoint(
        &self,
        _token: Option<&str>,
        endpoint_id: &str,
    ) -> Result<Vec<EndpointItem>, StoreError> {
        let limit = crate::config::config().upstream.item_query_limit as usize;
        Ok(self
            .inner
            .read()
            .await
            .items
            .iter()
            .filter(|item| item.endpoint_id == endpoint_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_item(
        &self,
        _token: &str,
        endpoint_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError> {
        let now = Utc::now();
        let item = EndpointItem {
            id: Self::next_id("it"),
            endpoint_id: endpoint_id.to_string(),
            data: values.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.inner.write().await.items.push(item.clone());
        Ok(item)
    }

    async fn fetch_item(&self, item_id: &str) -> Result<EndpointItem, StoreError> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("item {item_id} not found")))
    }

    async fn update_item(
        &self,
        _token: &str,
        item_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| StoreError::NotFound(format!("item {item_id} not found")))?;
        item.data = values.clone();
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    async fn delete_item(&self, _token: &str, item_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.items.len();
        inner.items.retain(|item| item.id != item_id);
        if inner.items.len() == before {
            return Err(StoreError::NotFound(format!("item {item_id} not found")));
        }
        Ok(())
    }
}
