//! Backend Gateway
//!
//! One operation per REST action. Every call resolves to the same
//! [`ApiResponse`] shape; only transport failures surface as errors.

mod http;
mod item;
mod list;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Action, ClientError};
use crate::models::{ItemPatch, ListPayload, NewItemPayload};

pub use http::HttpGateway;
pub use item::*;
pub use list::*;

/// Uniform result of a backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub ok: bool,
    pub status: u16,
    pub data: Option<Value>,
}

impl ApiResponse {
    pub const NO_CONTENT: u16 = 204;

    /// Build a response from a status and the raw body text.
    ///
    /// A 204 never looks at the body. Non-JSON bodies degrade to `{"raw": text}`.
    pub fn from_parts(status: u16, body: &str) -> Self {
        let ok = (200..300).contains(&status);
        if status == Self::NO_CONTENT {
            return Self { ok, status, data: None };
        }
        let data = if body.is_empty() {
            None
        } else {
            Some(parse_body(body))
        };
        Self { ok, status, data }
    }

    /// Server-provided error message from an `{error, message}` payload.
    pub fn error_message(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        data.get("message")
            .and_then(Value::as_str)
            .or_else(|| data.get("raw").and_then(Value::as_str))
            .map(str::to_string)
    }

    /// Fail with `RequestFailed` unless the response is 2xx.
    pub fn require_ok(self, action: Action) -> Result<Self, ClientError> {
        if self.ok {
            Ok(self)
        } else {
            Err(ClientError::RequestFailed {
                action,
                status: Some(self.status),
                detail: self.error_message(),
            })
        }
    }

    /// Decode the body of a 2xx response.
    pub fn decode<T: DeserializeOwned>(self, action: Action) -> Result<T, ClientError> {
        let data = self.require_ok(action)?.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| ClientError::Decode {
            action,
            message: e.to_string(),
        })
    }
}

fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({ "raw": body }))
}

/// Transport-level failure: the request never produced a response
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("network error: {message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Network failures share the `RequestFailed` path with HTTP errors.
    pub fn into_client_error(self, action: Action) -> ClientError {
        ClientError::RequestFailed {
            action,
            status: None,
            detail: Some(self.message),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

pub type GatewayResult = Result<ApiResponse, GatewayError>;

/// REST contract of the lists backend
///
/// Futures are `!Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait Gateway {
    async fn list_lists(&self, query: &ListQuery) -> GatewayResult;

    async fn create_list(&self, payload: &ListPayload) -> GatewayResult;

    async fn get_list(&self, list_id: &str) -> GatewayResult;

    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> GatewayResult;

    async fn delete_list(&self, list_id: &str) -> GatewayResult;

    async fn list_items(&self, list_id: &str) -> GatewayResult;

    async fn add_item(&self, list_id: &str, payload: &NewItemPayload) -> GatewayResult;

    async fn set_item_completion(&self, list_id: &str, item_id: &str, completado: bool) -> GatewayResult;

    async fn patch_item(&self, list_id: &str, item_id: &str, patch: &ItemPatch) -> GatewayResult;

    async fn delete_item(&self, list_id: &str, item_id: &str) -> GatewayResult;
}

#[async_trait(?Send)]
impl<G: Gateway + ?Sized> Gateway for std::rc::Rc<G> {
    async fn list_lists(&self, query: &ListQuery) -> GatewayResult {
        (**self).list_lists(query).await
    }

    async fn create_list(&self, payload: &ListPayload) -> GatewayResult {
        (**self).create_list(payload).await
    }

    async fn get_list(&self, list_id: &str) -> GatewayResult {
        (**self).get_list(list_id).await
    }

    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> GatewayResult {
        (**self).update_list(list_id, payload).await
    }

    async fn delete_list(&self, list_id: &str) -> GatewayResult {
        (**self).delete_list(list_id).await
    }

    async fn list_items(&self, list_id: &str) -> GatewayResult {
        (**self).list_items(list_id).await
    }

    async fn add_item(&self, list_id: &str, payload: &NewItemPayload) -> GatewayResult {
        (**self).add_item(list_id, payload).await
    }

    async fn set_item_completion(&self, list_id: &str, item_id: &str, completado: bool) -> GatewayResult {
        (**self).set_item_completion(list_id, item_id, completado).await
    }

    async fn patch_item(&self, list_id: &str, item_id: &str, patch: &ItemPatch) -> GatewayResult {
        (**self).patch_item(list_id, item_id, patch).await
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> GatewayResult {
        (**self).delete_item(list_id, item_id).await
    }
}
