//! Pala listing API client
//!
//! Two read-only endpoints are consumed:
//! - browse: `GET {base}?project_contract_address=..&order_by=..&wallet_address=..&limit=..&page=N`
//! - lookup: `GET {base}/{contract}/{itemNumber}?wallet_address=..&device_fingerprint=..`
//!
//! Requests are issued once; retrying is left to the user (a new search or
//! another "load more").

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::types::{Cursor, ItemDetail, ItemsResponse};
use crate::util_text::truncate_chars;

/// Max chars of an error body kept in the message
const ERROR_BODY_LIMIT: usize = 200;

/// Read side of the listing service
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch one browse page at `cursor`
    async fn fetch_page(&self, cursor: &Cursor) -> FetchResult<ItemsResponse>;

    /// Look up a single item by its number
    async fn fetch_item(&self, item_number: &str) -> FetchResult<ItemDetail>;
}

/// reqwest-backed [`ListingApi`]
pub struct PalaApi {
    client: reqwest::Client,
    base_url: String,
    contract_address: String,
    wallet_address: String,
    device_fingerprint: String,
    order_by: String,
    page_limit: u32,
    timeout: Duration,
}

impl PalaApi {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            contract_address: cfg.contract_address.clone(),
            wallet_address: cfg.wallet_address.clone(),
            device_fingerprint: cfg.device_fingerprint.clone(),
            order_by: cfg.order_by.clone(),
            page_limit: cfg.page_limit,
            timeout: Duration::from_millis(cfg.request_timeout_ms),
        })
    }

    pub fn items_url(&self, cursor: &Cursor) -> String {
        format!(
            "{}?project_contract_address={}&order_by={}&wallet_address={}&limit={}&page={}",
            self.base_url,
            self.contract_address,
            self.order_by,
            self.wallet_address,
            self.page_limit,
            urlencoding::encode(cursor.as_str()),
        )
    }

    pub fn item_url(&self, item_number: &str) -> String {
        format!(
            "{}/{}/{}?wallet_address={}&device_fingerprint={}",
            self.base_url,
            self.contract_address,
            urlencoding::encode(item_number),
            self.wallet_address,
            self.device_fingerprint,
        )
    }

    async fn get_json(&self, url: &str) -> FetchResult<Value> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_chars(body.trim(), ERROR_BODY_LIMIT),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ListingApi for PalaApi {
    async fn fetch_page(&self, cursor: &Cursor) -> FetchResult<ItemsResponse> {
        log::info!("[api] Fetching listings page {cursor}");
        let data = self.get_json(&self.items_url(cursor)).await?;
        let page: ItemsResponse = serde_json::from_value(data)?;
        log::info!("[api] Page {} returned {} items", cursor, page.items.len());
        Ok(page)
    }

    async fn fetch_item(&self, item_number: &str) -> FetchResult<ItemDetail> {
        log::info!("[api] Looking up item {item_number}");
        let data = self.get_json(&self.item_url(item_number)).await?;
        parse_item(data)
    }
}

/// Decode a lookup body, turning an error body into [`FetchError::Api`]
pub fn parse_item(data: Value) -> FetchResult<ItemDetail> {
    if !data.is_object() {
        return Err(FetchError::Decode(format!(
            "expected an item object, got {}",
            truncate_chars(&data.to_string(), ERROR_BODY_LIMIT)
        )));
    }
    if data.get("name").is_none() {
        if let Some(msg) = error_message(&data) {
            return Err(FetchError::Api(msg));
        }
    }
    Ok(serde_json::from_value(data)?)
}

/// Pull a message out of `{"error": ".."}`, `{"error": {"message": ".."}}` or `{"message": ".."}`
fn error_message(data: &Value) -> Option<String> {
    let err = data.get("error");
    err.and_then(Value::as_str)
        .or_else(|| err.and_then(|e| e.get("message")).and_then(Value::as_str))
        .or_else(|| data.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| err.filter(|e| !e.is_null()).map(Value::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> PalaApi {
        PalaApi::new(&Config::default()).unwrap()
    }

    #[test]
    fn items_url_matches_listing_endpoint() {
        assert_eq!(
            api().items_url(&Cursor::new("2")),
            "https://api.pala.world/tokens?project_contract_address=0x22D28b7E69eb45FDEaaf7B57161A53d94c648cAf\
             &order_by=listPriceInKlay.asc&wallet_address=0x0000000000000000000000000000000000000000&limit=20&page=2"
        );
    }

    #[test]
    fn item_url_encodes_number() {
        let api = api();
        assert_eq!(
            api.item_url("42"),
            "https://api.pala.world/tokens/0x22D28b7E69eb45FDEaaf7B57161A53d94c648cAf/42\
             ?wallet_address=0x0000000000000000000000000000000000000000&device_fingerprint=00b139586f748ed2adf91b838d9f99c2"
        );
        assert!(api.item_url("1/2?x").contains("/1%2F2%3Fx?"));
    }

    #[test]
    fn parse_item_reads_fields() {
        let item = parse_item(json!({
            "name": "Pala #42",
            "imageUrl": "https://img/42.png",
            "tokenId": 42,
            "listPriceInKlay": "99.5"
        }))
        .unwrap();
        assert_eq!(item.name.as_deref(), Some("Pala #42"));
        assert_eq!(item.image_url.as_deref(), Some("https://img/42.png"));
        assert_eq!(item.token_id, Some(json!(42)));
    }

    #[test]
    fn parse_item_surfaces_error_body() {
        let err = parse_item(json!({"error": "Token not found"})).unwrap_err();
        assert_eq!(err, FetchError::Api("Token not found".into()));

        let err = parse_item(json!({"error": {"message": "bad id", "code": 400}})).unwrap_err();
        assert_eq!(err, FetchError::Api("bad id".into()));

        let err = parse_item(json!({"statusCode": 404, "message": "Not Found"})).unwrap_err();
        assert_eq!(err, FetchError::Api("Not Found".into()));
    }

    #[test]
    fn parse_item_rejects_non_objects() {
        assert!(matches!(
            parse_item(json!([1, 2, 3])).unwrap_err(),
            FetchError::Decode(_)
        ));
    }
}
