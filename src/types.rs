use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::cursor::next_cursor;
use crate::error::{FetchError, FetchResult};

/// Opaque page-position token taken from the server's continuation link
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(String);

impl Cursor {
    pub const FIRST: &'static str = "1";

    pub fn new(raw: impl Into<String>) -> Self {
        Cursor(raw.into())
    }

    /// Cursor of the first page of a browse session
    pub fn first() -> Self {
        Cursor(Self::FIRST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing row as returned by the browse endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Number or decimal string depending on the listing
    #[serde(default)]
    pub list_price_in_klay: Option<Value>,
}

/// Single item as returned by the lookup endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub token_id: Option<Value>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub list_price_in_klay: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// Raw browse response body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    #[serde(default)]
    pub links: Option<Links>,
}

/// One fetched batch of items plus where to continue
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub cursor: Cursor,
    pub items: Vec<Item>,
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Build a page from the response fetched with `cursor`
    pub fn from_response(cursor: Cursor, resp: ItemsResponse) -> FetchResult<Page> {
        let link = resp.links.as_ref().and_then(|l| l.next.as_deref());
        let next_cursor = next_cursor(link)?;
        if next_cursor.as_ref() == Some(&cursor) {
            // A link pointing at the page we just fetched would loop forever.
            return Err(FetchError::MalformedLink(format!(
                "next link repeats page {cursor}"
            )));
        }
        Ok(Page {
            cursor,
            items: resp.items,
            next_cursor,
        })
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Browse page resolved (or failed) for `cursor`
    PageFetched {
        cursor: Cursor,
        result: FetchResult<Page>,
    },
    /// Lookup resolved (or failed) for search `term`
    ItemFetched {
        term: String,
        result: FetchResult<ItemDetail>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_response_accepts_missing_links() {
        let body = json!({
            "items": [{"uuid": "a", "name": "Pala #1", "imageUrl": "https://img/1.png"}]
        });
        let resp: ItemsResponse = serde_json::from_value(body).unwrap();
        let page = Page::from_response(Cursor::first(), resp).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].image_url.as_deref(), Some("https://img/1.png"));
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn items_response_requires_items() {
        let body = json!({"links": {"next": null}});
        assert!(serde_json::from_value::<ItemsResponse>(body).is_err());
    }

    #[test]
    fn page_reads_next_cursor_from_link() {
        let body = json!({
            "items": [],
            "links": {"next": "https://api.pala.world/tokens?limit=20&page=3"}
        });
        let resp: ItemsResponse = serde_json::from_value(body).unwrap();
        let page = Page::from_response(Cursor::new("2"), resp).unwrap();
        assert_eq!(page.next_cursor, Some(Cursor::new("3")));
    }

    #[test]
    fn page_rejects_self_referencing_link() {
        let body = json!({"items": [], "links": {"next": "/tokens?page=2"}});
        let resp: ItemsResponse = serde_json::from_value(body).unwrap();
        let err = Page::from_response(Cursor::new("2"), resp).unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));
    }
}
