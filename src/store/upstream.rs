//! Live proxy to the upstream MakeAPI data service.
//!
//! One outbound call per operation, no retry, no explicit timeout beyond
//! the transport defaults. Every request opts out of intermediary caching;
//! every mutating request carries the caller's bearer token.

use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use async_trait::async_trait;

use crate::api::envelope;
use crate::config;
use crate::model::endpoint::EndpointDraft;
use crate::model::{Endpoint, EndpointItem};
use crate::store::query::ItemQuery;
use crate::store::{EndpointStore, ItemStore, StoreError};

pub struct UpstreamStore {
    client: Client,
    base_url: String,
    item_query_limit: u32,
}

impl UpstreamStore {
    pub fn new(base_url: &str, item_query_limit: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            item_query_limit,
        }
    }

    pub fn from_config() -> Self {
        let cfg = config::config();
        Self::new(&cfg.upstream.base_url, cfg.upstream.item_query_limit)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json")
            // always-revalidate: no cache may serve stale endpoint/item data
            .header(header::CACHE_CONTROL, "no-store")
    }

    /// Run a request and return the decoded 2xx body. Non-2xx becomes an
    /// `Upstream` error with the status forwarded verbatim and the body's
    /// `message` when it has one; an unparseable 2xx body is a `Protocol`
    /// error.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Value, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let body: Option<Value> = response.json().await.ok();

        if !status.is_success() {
            return Err(upstream_failure(status, body.as_ref(), what));
        }
        body.ok_or_else(|| StoreError::Protocol(format!("{what}: response body is not JSON")))
    }

    /// Like [`send`] but for deletes, where the body is irrelevant.
    ///
    /// [`send`]: UpstreamStore::send
    async fn send_expecting_nothing(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<(), StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            return Err(upstream_failure(status, body.as_ref(), what));
        }
        Ok(())
    }
}

fn upstream_failure(status: StatusCode, body: Option<&Value>, what: &str) -> StoreError {
    let message = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{what} failed upstream"));
    tracing::warn!(status = status.as_u16(), message = %message, "upstream rejected {}", what);
    StoreError::Upstream { status: status.as_u16(), message }
}

fn decode_object<T: DeserializeOwned>(raw: Value, what: &str) -> Result<T, StoreError> {
    serde_json::from_value(envelope::pick_object(raw))
        .map_err(|e| StoreError::Protocol(format!("{what}: {e}")))
}

fn decode_array<T: DeserializeOwned>(raw: Value, what: &str) -> Result<Vec<T>, StoreError> {
    envelope::pick_array(raw)
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| StoreError::Protocol(format!("{what}: {e}")))
        })
        .collect()
}

#[async_trait]
impl EndpointStore for UpstreamStore {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, StoreError> {
        let raw = self
            .send(self.request(Method::GET, "/api/endpoint"), "list endpoints")
            .await?;
        decode_array(raw, "list endpoints")
    }

    async fn create_endpoint(
        &self,
        token: &str,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError> {
        let raw = self
            .send(
                self.request(Method::POST, "/api/endpoint")
                    .bearer_auth(token)
                    .json(draft),
                "create endpoint",
            )
            .await?;
        decode_object(raw, "create endpoint")
    }

    async fn fetch_endpoint(&self, id: &str) -> Result<Endpoint, StoreError> {
        let raw = self
            .send(
                self.request(Method::GET, &format!("/api/endpoint/{id}")),
                "fetch endpoint",
            )
            .await?;
        decode_object(raw, "fetch endpoint")
    }

    async fn update_endpoint(
        &self,
        token: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Endpoint, StoreError> {
        let raw = self
            .send(
                self.request(Method::PUT, &format!("/api/endpoint/{id}"))
                    .bearer_auth(token)
                    .json(patch),
                "update endpoint",
            )
            .await?;
        decode_object(raw, "update endpoint")
    }

    async fn delete_endpoint(&self, token: &str, id: &str) -> Result<(), StoreError> {
        self.send_expecting_nothing(
            self.request(Method::DELETE, &format!("/api/endpoint/{id}"))
                .bearer_auth(token),
            "delete endpoint",
        )
        .await
    }
}

#[async_trait]
impl ItemStore for UpstreamStore {
    async fn items_by_endpoint(
        &self,
        token: Option<&str>,
        endpoint_id: &str,
    ) -> Result<Vec<EndpointItem>, StoreError> {
        let query = ItemQuery::by_endpoint(endpoint_id, self.item_query_limit);
        let mut request = self
            .request(Method::POST, "/api/itens/query")
            .json(&query);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let raw = self.send(request, "query items").await?;
        decode_array(raw, "query items")
    }

    async fn create_item(
        &self,
        token: &str,
        endpoint_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError> {
        // the upstream wire shape names the payload `values`, not `data`
        let body = json!({ "endpointId": endpoint_id, "values": values });
        let raw = self
            .send(
                self.request(Method::POST, "/api/itens")
                    .bearer_auth(token)
                    .json(&body),
                "create item",
            )
            .await?;
        decode_object(raw, "create item")
    }

    async fn fetch_item(&self, item_id: &str) -> Result<EndpointItem, StoreError> {
        let raw = self
            .send(
                self.request(Method::GET, &format!("/api/itens/{item_id}")),
                "fetch item",
            )
            .await?;
        decode_object(raw, "fetch item")
    }

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        values: &Map<String, Value>,
    ) -> Result<EndpointItem, StoreError> {
        let raw = self
            .send(
                self.request(Method::PATCH, &format!("/api/itens/{item_id}"))
                    .bearer_auth(token)
                    .json(&json!({ "values": values })),
                "update item",
            )
            .await?;
        decode_object(raw, "update item")
    }

    async fn delete_item(&self, token: &str, item_id: &str) -> Result<(), StoreError> {
        self.send_expecting_nothing(
            self.request(Method::DELETE, &format!("/api/itens/{item_id}"))
                .bearer_auth(token),
            "delete item",
        )
        .await
    }
}
