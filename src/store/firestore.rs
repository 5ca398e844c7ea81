//! # Firestore Store
//!
//! The remote inventory collection, reached through the Firestore REST API.
//! Each record is a document named after its key with a single integer field,
//! `quantity`.

use crate::config::StoreConfig;
use crate::model::InventoryItem;
use crate::store::{InventoryStore, StoreError};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

const PAGE_SIZE: u32 = 300;
const QUANTITY_FIELD: &str = "quantity";

/// Client for a Firestore-hosted inventory collection.
pub struct FirestoreStore {
    http: reqwest::Client,
    config: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Uses a preconfigured HTTP client, e.g. one with custom timeouts or proxies.
    pub fn with_client(http: reqwest::Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// URL of the collection, or of one document in it when `key` is given.
    fn url(&self, key: Option<&str>) -> Result<Url, StoreError> {
        let base = &self.config.base_url;
        let mut url =
            Url::parse(base).map_err(|e| StoreError::InvalidUrl(format!("{base}: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(base.clone()))?;
            segments.pop_if_empty().extend([
                "projects",
                self.config.project_id.as_str(),
                "databases",
                self.config.database.as_str(),
                "documents",
                self.config.collection.as_str(),
            ]);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        if let Some(api_key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", api_key);
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, StoreError> {
        let mut url = self.url(None)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        let response = self.authorize(self.http.get(url)).send().await?;
        read_json(check_status(response).await?).await
    }
}

#[async_trait]
impl InventoryStore for FirestoreStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        debug!("Fetching document");
        let response = self.authorize(self.http.get(self.url(Some(key))?)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Document not found");
            return Ok(None);
        }
        let document: Document = read_json(check_status(response).await?).await?;
        decode_quantity(key, &document.fields).map(Some)
    }

    #[instrument(skip(self))]
    async fn set(&self, key: &str, quantity: u32) -> Result<(), StoreError> {
        debug!("Writing document");
        let response = self
            .authorize(self.http.patch(self.url(Some(key))?))
            .json(&encode_quantity(quantity))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!("Deleting document");
        let response = self.authorize(self.http.delete(self.url(Some(key))?)).send().await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            for document in &page.documents {
                let key = document_id(&document.name);
                items.push(InventoryItem::new(key, decode_quantity(key, &document.fields)?));
            }
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        debug!(count = items.len(), "Listed documents");
        Ok(items)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = status_error(status.as_u16(), &body);
    warn!(status = status.as_u16(), error = %error, "Store request failed");
    Err(error)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn status_error(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());
    match status {
        401 | 403 => StoreError::PermissionDenied(message),
        429 => StoreError::QuotaExceeded(message),
        _ => StoreError::Api { status, message },
    }
}

fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn encode_quantity(quantity: u32) -> Value {
    json!({ "fields": { QUANTITY_FIELD: { "integerValue": quantity.to_string() } } })
}

fn decode_quantity(key: &str, fields: &Map<String, Value>) -> Result<u32, StoreError> {
    let malformed = |reason: String| StoreError::MalformedDocument {
        key: key.to_string(),
        reason,
    };
    let value = fields
        .get(QUANTITY_FIELD)
        .ok_or_else(|| malformed("missing quantity field".to_string()))?;
    let raw = match value.get("integerValue") {
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map_err(|e| malformed(format!("quantity {s:?} is not an integer: {e}")))?,
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| malformed(format!("quantity {n} is not an integer")))?,
        _ => return Err(malformed(format!("quantity is not an integer value: {value}"))),
    };
    u32::try_from(raw).map_err(|_| malformed(format!("quantity {raw} is out of range")))
}
