//! HTTP Gateway
//!
//! `reqwest` client against the lists REST API. On wasm32 this goes through
//! the browser's `fetch`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;

use super::item::{item_path, item_props_path, items_path};
use super::list::{list_path, CompletionArgs, ListQuery, LISTS_PATH};
use super::{ApiResponse, Gateway, GatewayResult};
use crate::models::{ItemPatch, ListPayload, NewItemPayload};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(&self, builder: RequestBuilder) -> GatewayResult {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        if status == ApiResponse::NO_CONTENT {
            return Ok(ApiResponse::from_parts(status, ""));
        }
        let body = response.text().await?;
        let resp = ApiResponse::from_parts(status, &body);
        if !resp.ok {
            log::warn!("[gateway] HTTP {} ({} bytes)", status, body.len());
        }
        Ok(resp)
    }

    async fn send_json<T: Serialize + ?Sized>(&self, method: Method, path: &str, body: &T) -> GatewayResult {
        log::debug!("[gateway] {} {}", method, path);
        self.send(self.request(method, path).json(body)).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> GatewayResult {
        log::debug!("[gateway] {} {}", method, path);
        self.send(self.request(method, path)).await
    }
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn list_lists(&self, query: &ListQuery) -> GatewayResult {
        log::debug!("[gateway] GET {} {:?}", LISTS_PATH, query);
        self.send(self.request(Method::GET, LISTS_PATH).query(query)).await
    }

    async fn create_list(&self, payload: &ListPayload) -> GatewayResult {
        self.send_json(Method::POST, LISTS_PATH, payload).await
    }

    async fn get_list(&self, list_id: &str) -> GatewayResult {
        self.send_empty(Method::GET, &list_path(list_id)).await
    }

    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> GatewayResult {
        self.send_json(Method::PUT, &list_path(list_id), payload).await
    }

    async fn delete_list(&self, list_id: &str) -> GatewayResult {
        self.send_empty(Method::DELETE, &list_path(list_id)).await
    }

    async fn list_items(&self, list_id: &str) -> GatewayResult {
        self.send_empty(Method::GET, &items_path(list_id)).await
    }

    async fn add_item(&self, list_id: &str, payload: &NewItemPayload) -> GatewayResult {
        self.send_json(Method::POST, &items_path(list_id), payload).await
    }

    async fn set_item_completion(&self, list_id: &str, item_id: &str, completado: bool) -> GatewayResult {
        let args = CompletionArgs { completado };
        self.send_json(Method::PATCH, &item_path(list_id, item_id), &args).await
    }

    async fn patch_item(&self, list_id: &str, item_id: &str, patch: &ItemPatch) -> GatewayResult {
        self.send_json(Method::PATCH, &item_props_path(list_id, item_id), patch).await
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> GatewayResult {
        self.send_empty(Method::DELETE, &item_path(list_id, item_id)).await
    }
}
