//! Reqwest-backed item source adapter for the gw2spidy JSON API.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain item types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ItemListResponseDto, ItemResponseDto, ItemTypesResponseDto};
use crate::domain::ports::{ItemDataSource, ItemDataSourceError};
use crate::domain::{ItemCategory, ItemData, ItemId, ItemListing, ItemType};

const DEFAULT_USER_AGENT: &str = "salvage-ledger/0.1";

/// Item source adapter that performs HTTP GET requests below one base URL.
pub struct ItemApiHttpSource {
    client: Client,
    base_url: Url,
}

impl ItemApiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A missing trailing slash on `base_url` is added so relative paths
    /// resolve below it rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: normalise_base(base_url),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ItemDataSourceError> {
        let url = self.base_url.join(path).map_err(|error| {
            ItemDataSourceError::invalid_request(format!("cannot join {path}: {error}"))
        })?;
        debug!(%url, "requesting item source");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, path, body.as_ref()));
        }

        decode(body.as_ref())
    }
}

#[async_trait]
impl ItemDataSource for ItemApiHttpSource {
    async fn fetch_item(&self, id: ItemId) -> Result<ItemData, ItemDataSourceError> {
        let decoded: ItemResponseDto = self.get_json(&format!("item/{id}")).await?;
        decoded
            .result
            .into_domain()
            .map_err(ItemDataSourceError::decode)
    }

    async fn fetch_item_types(&self) -> Result<Vec<ItemType>, ItemDataSourceError> {
        let decoded: ItemTypesResponseDto = self.get_json("types").await?;
        decoded.into_domain().map_err(ItemDataSourceError::decode)
    }

    async fn fetch_category_items(
        &self,
        category: ItemCategory,
    ) -> Result<ItemListing, ItemDataSourceError> {
        let decoded: ItemListResponseDto =
            self.get_json(&format!("all-items/{category}")).await?;
        Ok(decoded.into_domain())
    }
}

fn normalise_base(mut base_url: Url) -> Url {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ItemDataSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        ItemDataSourceError::decode(format!("invalid item source JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> ItemDataSourceError {
    if error.is_timeout() {
        ItemDataSourceError::timeout(error.to_string())
    } else {
        ItemDataSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, path: &str, body: &[u8]) -> ItemDataSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => ItemDataSourceError::not_found(path),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ItemDataSourceError::timeout(message)
        }
        _ => ItemDataSourceError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
