//! Application-lifetime context.
//!
//! Owns everything that outlives a single screen: configuration, the listing
//! API client, both query caches and the fetcher task. Created once at startup
//! and shut down explicitly before exit.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::{ListingApi, PalaApi};
use crate::cache::QueryCache;
use crate::config::Config;
use crate::controller::Controller;
use crate::fetcher::{FetchRequest, Fetcher};
use crate::location::MemoryLocation;
use crate::types::{AppEvent, ItemDetail, Page};

pub struct AppContext {
    config: Config,
    api: Arc<dyn ListingApi>,
    pages: Arc<QueryCache<Page>>,
    items: Arc<QueryCache<ItemDetail>>,
    fetcher_task: Option<JoinHandle<()>>,
}

impl AppContext {
    /// Context backed by the real listing API
    pub fn new(config: Config) -> Result<Self> {
        let api = PalaApi::new(&config)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Context backed by any [`ListingApi`] (tests, alternative backends)
    pub fn with_api(config: Config, api: Arc<dyn ListingApi>) -> Self {
        let stale_time = Duration::from_millis(config.stale_time_ms);
        Self {
            config,
            api,
            pages: Arc::new(QueryCache::new(stale_time)),
            items: Arc::new(QueryCache::new(stale_time)),
            fetcher_task: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page_cache(&self) -> &QueryCache<Page> {
        &self.pages
    }

    pub fn item_cache(&self) -> &QueryCache<ItemDetail> {
        &self.items
    }

    /// Spawn the fetcher task; results arrive on `event_tx`.
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetcher(&mut self, event_tx: UnboundedSender<AppEvent>) -> UnboundedSender<FetchRequest> {
        if let Some(task) = self.fetcher_task.take() {
            log::warn!("[context] replacing running fetcher");
            task.abort();
        }
        let (fetch_tx, fetch_rx) = unbounded_channel();
        let fetcher = Fetcher::new(self.api.clone(), self.pages.clone(), self.items.clone());
        self.fetcher_task = Some(tokio::spawn(fetcher.run(fetch_rx, event_tx)));
        fetch_tx
    }

    /// Spawn the fetcher and build a controller reading its initial term from
    /// the configured deep link
    pub fn start_controller(&mut self, event_tx: UnboundedSender<AppEvent>) -> Controller {
        let location = match self.config.link.as_deref() {
            Some(link) => MemoryLocation::from_link(link),
            None => MemoryLocation::default(),
        };
        let fetch_tx = self.spawn_fetcher(event_tx);
        Controller::new(location, fetch_tx)
    }

    /// Stop the fetcher and drop cached data. Requests already handed to the
    /// network finish on their own tasks; their results go nowhere.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.fetcher_task.take() {
            task.abort();
        }
        self.pages.clear();
        self.items.clear();
        log::info!("[context] shut down");
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        if let Some(task) = self.fetcher_task.take() {
            task.abort();
        }
    }
}
