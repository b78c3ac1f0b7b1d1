use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::api::ListingApi;
use crate::cache::{QueryCache, QueryKey};
use crate::types::{AppEvent, Cursor, ItemDetail, Page};

/// Work item sent by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    Page { cursor: Cursor },
    Item { term: String },
}

/// Resolves fetch requests through the query caches
#[derive(Clone)]
pub struct Fetcher {
    api: Arc<dyn ListingApi>,
    pages: Arc<QueryCache<Page>>,
    items: Arc<QueryCache<ItemDetail>>,
}

impl Fetcher {
    pub fn new(
        api: Arc<dyn ListingApi>,
        pages: Arc<QueryCache<Page>>,
        items: Arc<QueryCache<ItemDetail>>,
    ) -> Self {
        Self { api, pages, items }
    }

    /// Run one request to completion and wrap the outcome as an event
    pub async fn resolve(&self, req: FetchRequest) -> AppEvent {
        match req {
            FetchRequest::Page { cursor } => {
                let api = self.api.clone();
                let page_cursor = cursor.clone();
                let result = self
                    .pages
                    .fetch(
                        QueryKey::ProjectItems {
                            page: cursor.clone(),
                        },
                        move || async move {
                            let resp = api.fetch_page(&page_cursor).await?;
                            Page::from_response(page_cursor, resp)
                        },
                    )
                    .await;
                if let Err(ref e) = result {
                    log::warn!("[fetcher] page {cursor} failed: {e}");
                }
                AppEvent::PageFetched { cursor, result }
            }
            FetchRequest::Item { term } => {
                let api = self.api.clone();
                let item_number = term.clone();
                let result = self
                    .items
                    .fetch(
                        QueryKey::ProjectItemSearch { term: term.clone() },
                        move || async move { api.fetch_item(&item_number).await },
                    )
                    .await;
                if let Err(ref e) = result {
                    log::warn!("[fetcher] lookup {term:?} failed: {e}");
                }
                AppEvent::ItemFetched { term, result }
            }
        }
    }

    /// Background task: every request runs on its own task so browse and
    /// lookup streams never wait on each other. Exits when the controller's
    /// sender is dropped.
    pub async fn run(
        self,
        mut fetch_rx: UnboundedReceiver<FetchRequest>,
        event_tx: UnboundedSender<AppEvent>,
    ) {
        log::info!("[fetcher] started");
        while let Some(req) = fetch_rx.recv().await {
            log::debug!("[fetcher] received {req:?}");
            let this = self.clone();
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                let ev = this.resolve(req).await;
                if event_tx.send(ev).is_err() {
                    log::debug!("[fetcher] event receiver gone, dropping result");
                }
            });
        }
        log::info!("[fetcher] shutting down");
    }
}
