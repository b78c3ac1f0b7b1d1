//! Pagination/search controller
//!
//! One search term selects between two data flows:
//!
//! - **browse** (empty term): cursor-paginated listing pages, appended in
//!   request order as the user asks for more
//! - **lookup** (non-empty term): a single item fetched by number
//!
//! The controller never awaits. It sends [`FetchRequest`]s to the fetcher and
//! receives results through [`Controller::on_event`], so every state change
//! happens on the UI task. In-flight requests are never cancelled; a result is
//! applied only if it still matches the in-flight cursor (browse) or the
//! current term (lookup).
//!
//! Browse state is keyed independently of the term: a detour through lookup
//! mode leaves fetched pages untouched and browsing resumes where it stopped.
//! Lookup state belongs to exactly one term and is discarded when the term
//! changes.

use tokio::sync::mpsc::UnboundedSender;

use crate::error::FetchError;
use crate::fetcher::FetchRequest;
use crate::location::{Location, LocationUpdate, MemoryLocation};
use crate::types::{AppEvent, Cursor, Item, ItemDetail, Page};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Lookup,
}

impl Mode {
    pub fn for_term(term: &str) -> Self {
        if term.is_empty() {
            Mode::Browse
        } else {
            Mode::Lookup
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Success,
    Error,
}

/// Snapshot handed to the view
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<'a> {
    pub mode: Mode,
    pub status: FetchStatus,
    pub error: Option<&'a str>,
    /// Browse pages in fetch order (empty in lookup mode)
    pub pages: &'a [Page],
    /// Lookup result (always `None` in browse mode)
    pub item: Option<&'a ItemDetail>,
    pub has_next_page: bool,
    /// A request other than "next page" is in flight
    pub is_fetching: bool,
    pub is_fetching_next_page: bool,
}

impl<'a> FetchState<'a> {
    /// Items of all pages, in fetch order
    pub fn items(&self) -> impl Iterator<Item = &'a Item> + 'a {
        let pages: &'a [Page] = self.pages;
        pages.iter().flat_map(|p| p.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }

    /// "Load more" is actionable
    pub fn can_fetch_next_page(&self) -> bool {
        self.mode == Mode::Browse && self.has_next_page && !self.is_fetching_next_page
    }
}

#[derive(Debug, Default)]
struct BrowseState {
    pages: Vec<Page>,
    next_cursor: Option<Cursor>,
    in_flight: Option<Cursor>,
    status: FetchStatus,
    error: Option<String>,
}

#[derive(Debug)]
struct LookupState {
    term: String,
    item: Option<ItemDetail>,
    in_flight: bool,
    status: FetchStatus,
    error: Option<String>,
}

pub struct Controller<L: Location = MemoryLocation> {
    location: L,
    term: String,
    browse: BrowseState,
    lookup: Option<LookupState>,
    fetch_tx: UnboundedSender<FetchRequest>,
}

impl<L: Location> Controller<L> {
    /// Read the term from `location` and start the matching flow
    pub fn new(location: L, fetch_tx: UnboundedSender<FetchRequest>) -> Self {
        let term = location.search();
        let mut controller = Self {
            location,
            term,
            browse: BrowseState::default(),
            lookup: None,
            fetch_tx,
        };
        controller.activate();
        controller
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn mode(&self) -> Mode {
        Mode::for_term(&self.term)
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Update the term, write it to the location and enable the matching flow
    pub fn set_search_term(&mut self, term: &str, update: LocationUpdate) {
        self.location.set_search(term, update);
        if term != self.term {
            log::debug!("[controller] search term {:?} -> {:?}", self.term, term);
            self.term = term.to_string();
        }
        self.activate();
    }

    /// Re-read the term after a navigation (back/forward, deep link)
    pub fn sync_from_location(&mut self) {
        let term = self.location.search();
        if term != self.term {
            log::debug!("[controller] location changed term to {term:?}");
            self.term = term;
        }
        self.activate();
    }

    fn activate(&mut self) {
        match self.mode() {
            Mode::Browse => {
                self.lookup = None;
                if !self.location.shows_listings() {
                    log::debug!("[controller] listings not shown, browse deferred");
                    return;
                }
                if self.browse.pages.is_empty() && self.browse.in_flight.is_none() {
                    self.request_page(Cursor::first());
                }
            }
            Mode::Lookup => {
                let stale = self
                    .lookup
                    .as_ref()
                    .map_or(true, |l| l.term != self.term);
                if stale {
                    self.start_lookup();
                }
            }
        }
    }

    /// Request the page after the last fetched one.
    ///
    /// Ignored outside browse mode or the listing screen, while a browse
    /// request is in flight, or when the server reported no further pages.
    /// If the first page failed, this requests it again. Returns whether a
    /// request was sent.
    pub fn fetch_next_page(&mut self) -> bool {
        if self.mode() != Mode::Browse {
            log::debug!("[controller] fetch_next_page ignored in lookup mode");
            return false;
        }
        if !self.location.shows_listings() {
            return false;
        }
        if let Some(ref cursor) = self.browse.in_flight {
            log::debug!("[controller] fetch_next_page ignored, page {cursor} in flight");
            return false;
        }
        if self.browse.pages.is_empty() {
            self.request_page(Cursor::first());
            return true;
        }
        match self.browse.next_cursor.clone() {
            Some(cursor) => {
                self.request_page(cursor);
                true
            }
            None => {
                log::debug!("[controller] fetch_next_page ignored, no more pages");
                false
            }
        }
    }

    fn request_page(&mut self, cursor: Cursor) {
        self.browse.status = if self.browse.pages.is_empty() {
            FetchStatus::Loading
        } else {
            FetchStatus::LoadingMore
        };
        log::info!("[controller] requesting page {cursor}");
        if self
            .fetch_tx
            .send(FetchRequest::Page {
                cursor: cursor.clone(),
            })
            .is_err()
        {
            self.browse.status = FetchStatus::Error;
            self.browse.error = Some(FetchError::FetcherStopped.to_string());
            return;
        }
        self.browse.in_flight = Some(cursor);
    }

    fn start_lookup(&mut self) {
        log::info!("[controller] looking up item {:?}", self.term);
        let mut lookup = LookupState {
            term: self.term.clone(),
            item: None,
            in_flight: true,
            status: FetchStatus::Loading,
            error: None,
        };
        if self
            .fetch_tx
            .send(FetchRequest::Item {
                term: self.term.clone(),
            })
            .is_err()
        {
            lookup.in_flight = false;
            lookup.status = FetchStatus::Error;
            lookup.error = Some(FetchError::FetcherStopped.to_string());
        }
        self.lookup = Some(lookup);
    }

    /// Apply a fetch result; results for superseded requests are dropped
    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::PageFetched { cursor, result } => self.on_page(cursor, result),
            AppEvent::ItemFetched { term, result } => self.on_item(term, result),
        }
    }

    fn on_page(&mut self, cursor: Cursor, result: Result<Page, FetchError>) {
        if self.browse.in_flight.as_ref() != Some(&cursor) {
            log::debug!("[controller] dropping unexpected page {cursor}");
            return;
        }
        self.browse.in_flight = None;

        match result {
            Ok(page) => {
                if self.held(&page.cursor) {
                    self.browse.next_cursor = None;
                    self.fail_browse(FetchError::MalformedLink(format!(
                        "page {cursor} was already fetched"
                    )));
                    return;
                }
                log::info!(
                    "[controller] page {} appended ({} items, next: {})",
                    cursor,
                    page.items.len(),
                    page.next_cursor.as_ref().map_or("none", |c| c.as_str())
                );
                let loops_back = page.next_cursor.clone().filter(|next| self.held(next));
                self.browse.next_cursor = page.next_cursor.clone();
                self.browse.pages.push(page);
                match loops_back {
                    // The items are real; only the continuation is unusable.
                    Some(next) => {
                        self.browse.next_cursor = None;
                        self.fail_browse(FetchError::MalformedLink(format!(
                            "next link of page {cursor} points back to page {next}"
                        )));
                    }
                    None => {
                        self.browse.status = FetchStatus::Success;
                        self.browse.error = None;
                    }
                }
            }
            Err(e) => {
                log::warn!("[controller] page {cursor} failed: {e}");
                self.browse.status = FetchStatus::Error;
                self.browse.error = Some(e.to_string());
            }
        }
    }

    fn held(&self, cursor: &Cursor) -> bool {
        self.browse.pages.iter().any(|p| &p.cursor == cursor)
    }

    fn fail_browse(&mut self, e: FetchError) {
        log::warn!("[controller] {e}");
        self.browse.status = FetchStatus::Error;
        self.browse.error = Some(e.to_string());
    }

    fn on_item(&mut self, term: String, result: Result<ItemDetail, FetchError>) {
        let lookup = match self.lookup.as_mut() {
            Some(l) if l.term == term && l.in_flight => l,
            _ => {
                log::debug!("[controller] dropping stale lookup result for {term:?}");
                return;
            }
        };
        lookup.in_flight = false;
        match result {
            Ok(item) => {
                lookup.item = Some(item);
                lookup.status = FetchStatus::Success;
                lookup.error = None;
            }
            Err(e) => {
                log::warn!("[controller] lookup {term:?} failed: {e}");
                lookup.status = FetchStatus::Error;
                lookup.error = Some(e.to_string());
            }
        }
    }

    /// Snapshot of the active flow
    pub fn current_state(&self) -> FetchState<'_> {
        match self.mode() {
            Mode::Browse => {
                let b = &self.browse;
                let next_page_in_flight = b.in_flight.is_some() && !b.pages.is_empty();
                FetchState {
                    mode: Mode::Browse,
                    status: b.status,
                    error: b.error.as_deref(),
                    pages: &b.pages,
                    item: None,
                    has_next_page: !b.pages.is_empty() && b.next_cursor.is_some(),
                    is_fetching: b.in_flight.is_some() && !next_page_in_flight,
                    is_fetching_next_page: next_page_in_flight,
                }
            }
            Mode::Lookup => {
                let (status, error, item, in_flight) = match self.lookup {
                    Some(ref l) => (l.status, l.error.as_deref(), l.item.as_ref(), l.in_flight),
                    None => (FetchStatus::Idle, None, None, false),
                };
                FetchState {
                    mode: Mode::Lookup,
                    status,
                    error,
                    pages: &[],
                    item,
                    has_next_page: false,
                    is_fetching: in_flight,
                    is_fetching_next_page: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;
    use serde_json::json;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn item(uuid: &str) -> Item {
        Item {
            uuid: uuid.to_string(),
            name: format!("Pala {uuid}"),
            image_url: None,
            list_price_in_klay: Some(json!(10)),
        }
    }

    fn page(cursor: &str, uuids: &[&str], next: Option<&str>) -> Page {
        Page {
            cursor: Cursor::new(cursor),
            items: uuids.iter().map(|u| item(u)).collect(),
            next_cursor: next.map(Cursor::new),
        }
    }

    fn detail(name: &str) -> ItemDetail {
        ItemDetail {
            name: Some(name.to_string()),
            image_url: Some(format!("https://img/{name}.png")),
            token_id: None,
            owner_address: None,
            list_price_in_klay: None,
        }
    }

    fn page_event(cursor: &str, result: Result<Page, FetchError>) -> AppEvent {
        AppEvent::PageFetched {
            cursor: Cursor::new(cursor),
            result,
        }
    }

    fn item_event(term: &str, result: Result<ItemDetail, FetchError>) -> AppEvent {
        AppEvent::ItemFetched {
            term: term.to_string(),
            result,
        }
    }

    fn drain(rx: &mut UnboundedReceiver<FetchRequest>) -> Vec<FetchRequest> {
        let mut out = Vec::new();
        while let Ok(req) = rx.try_recv() {
            out.push(req);
        }
        out
    }

    fn page_req(cursor: &str) -> FetchRequest {
        FetchRequest::Page {
            cursor: Cursor::new(cursor),
        }
    }

    fn item_req(term: &str) -> FetchRequest {
        FetchRequest::Item {
            term: term.to_string(),
        }
    }

    fn browse_controller() -> (Controller, UnboundedReceiver<FetchRequest>) {
        let (tx, mut rx) = unbounded_channel();
        let c = Controller::new(MemoryLocation::new(Route::project()), tx);
        assert_eq!(drain(&mut rx), vec![page_req("1")]);
        (c, rx)
    }

    fn names(c: &Controller) -> Vec<String> {
        c.current_state().items().map(|i| i.uuid.clone()).collect()
    }

    #[test]
    fn mode_follows_term_emptiness() {
        for (term, mode) in [("", Mode::Browse), ("0", Mode::Lookup), (" ", Mode::Lookup)] {
            assert_eq!(Mode::for_term(term), mode);
        }
    }

    #[test]
    fn browse_starts_loading_first_page() {
        let (c, _rx) = browse_controller();
        let s = c.current_state();
        assert_eq!(s.mode, Mode::Browse);
        assert_eq!(s.status, FetchStatus::Loading);
        assert!(s.is_fetching);
        assert!(!s.is_fetching_next_page);
        assert!(!s.can_fetch_next_page());
    }

    #[test]
    fn pages_accumulate_in_request_order() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a", "b"], Some("2")))));
        assert_eq!(c.current_state().status, FetchStatus::Success);
        assert!(c.current_state().can_fetch_next_page());

        assert!(c.fetch_next_page());
        assert_eq!(drain(&mut rx), vec![page_req("2")]);
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::LoadingMore);
        assert!(s.is_fetching_next_page);
        assert!(!s.is_fetching);

        c.on_event(page_event("2", Ok(page("2", &["c"], Some("3")))));
        assert!(c.fetch_next_page());
        c.on_event(page_event("3", Ok(page("3", &["d"], None))));

        assert_eq!(names(&c), vec!["a", "b", "c", "d"]);
        let cursors: Vec<_> = c
            .current_state()
            .pages
            .iter()
            .map(|p| p.cursor.to_string())
            .collect();
        assert_eq!(cursors, vec!["1", "2", "3"]);
    }

    #[test]
    fn fetch_next_page_while_pending_is_ignored() {
        let (mut c, mut rx) = browse_controller();
        assert!(!c.fetch_next_page());
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));

        assert!(c.fetch_next_page());
        assert!(!c.fetch_next_page());
        assert!(!c.fetch_next_page());
        assert_eq!(drain(&mut rx), vec![page_req("2")]);
    }

    #[test]
    fn fetch_next_page_without_cursor_is_noop() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a"], None))));

        let before = format!("{:?}", c.current_state());
        assert!(!c.current_state().has_next_page);
        assert!(!c.fetch_next_page());
        assert_eq!(format!("{:?}", c.current_state()), before);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn duplicate_or_unexpected_pages_are_dropped() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));
        // Delivered twice (e.g. a cache replay): not in flight any more.
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));
        // Never requested.
        c.on_event(page_event("9", Ok(page("9", &["z"], None))));
        assert_eq!(names(&c), vec!["a"]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn link_back_to_earlier_page_ends_browsing() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));
        assert!(c.fetch_next_page());
        c.on_event(page_event("2", Ok(page("2", &["b"], Some("1")))));

        let s = c.current_state();
        assert_eq!(names(&c), vec!["a", "b"]);
        assert_eq!(s.status, FetchStatus::Error);
        assert!(s.error.unwrap().contains("points back to page 1"));
        assert!(!s.has_next_page);
        assert!(!s.can_fetch_next_page());

        for _ in 0..5 {
            assert!(!c.fetch_next_page());
        }
        assert_eq!(drain(&mut rx), vec![page_req("2")]);
    }

    #[test]
    fn refetched_page_already_held_stops_paging() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));
        assert!(c.fetch_next_page());
        // Server answers the request for page 2 with page 1's contents.
        c.on_event(page_event("2", Ok(page("1", &["a"], Some("2")))));

        let s = c.current_state();
        assert_eq!(names(&c), vec!["a"]);
        assert_eq!(s.status, FetchStatus::Error);
        assert!(!s.can_fetch_next_page());
        assert!(!c.fetch_next_page());
        assert_eq!(drain(&mut rx), vec![page_req("2")]);
    }

    #[test]
    fn home_route_defers_browsing_until_project_opens() {
        let (tx, mut rx) = unbounded_channel();
        let mut c = Controller::new(MemoryLocation::default(), tx);
        assert_eq!(c.mode(), Mode::Browse);
        assert_eq!(c.current_state().status, FetchStatus::Idle);
        assert!(!c.fetch_next_page());
        assert!(drain(&mut rx).is_empty());

        c.location_mut().navigate(Route::project(), LocationUpdate::Push);
        c.sync_from_location();
        assert_eq!(drain(&mut rx), vec![page_req("1")]);
        assert_eq!(c.current_state().status, FetchStatus::Loading);

        // Going home again keeps what was fetched without new requests.
        c.on_event(page_event("1", Ok(page("1", &["a"], None))));
        c.location_mut().navigate(Route::Home, LocationUpdate::Push);
        c.sync_from_location();
        assert_eq!(names(&c), vec!["a"]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn next_page_error_keeps_pages_and_allows_retry() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a", "b"], Some("2")))));
        c.fetch_next_page();
        drain(&mut rx);

        c.on_event(page_event(
            "2",
            Err(FetchError::Status {
                status: 500,
                body: "Internal Server Error".into(),
            }),
        ));
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Error);
        assert!(s.error.unwrap().contains("500"));
        assert_eq!(names(&c), vec!["a", "b"]);

        assert!(c.fetch_next_page());
        assert_eq!(drain(&mut rx), vec![page_req("2")]);
        c.on_event(page_event("2", Ok(page("2", &["c"], None))));
        assert_eq!(c.current_state().status, FetchStatus::Success);
        assert!(c.current_state().error.is_none());
        assert_eq!(names(&c), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_page_error_can_be_retried() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Err(FetchError::Transport("offline".into()))));
        assert_eq!(c.current_state().status, FetchStatus::Error);

        assert!(c.fetch_next_page());
        assert_eq!(drain(&mut rx), vec![page_req("1")]);
        assert_eq!(c.current_state().status, FetchStatus::Loading);
    }

    #[test]
    fn lookup_issues_exactly_one_request() {
        let (mut c, mut rx) = browse_controller();
        c.set_search_term("7", LocationUpdate::Replace);
        assert_eq!(drain(&mut rx), vec![item_req("7")]);
        assert_eq!(c.mode(), Mode::Lookup);

        // Same term again: no new request.
        c.set_search_term("7", LocationUpdate::Replace);
        assert!(drain(&mut rx).is_empty());

        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Loading);
        assert!(s.item.is_none());
        assert!(s.pages.is_empty());
    }

    #[test]
    fn superseded_lookup_result_is_discarded() {
        let (mut c, mut rx) = browse_controller();
        c.set_search_term("7", LocationUpdate::Replace);
        c.set_search_term("8", LocationUpdate::Replace);
        assert_eq!(drain(&mut rx), vec![item_req("7"), item_req("8")]);

        c.on_event(item_event("7", Ok(detail("seven"))));
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Loading);
        assert!(s.item.is_none());

        c.on_event(item_event("8", Ok(detail("eight"))));
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Success);
        assert_eq!(s.item.unwrap().name.as_deref(), Some("eight"));
    }

    #[test]
    fn lookup_error_then_new_term_retries() {
        let (mut c, mut rx) = browse_controller();
        c.set_search_term("7", LocationUpdate::Replace);
        c.on_event(item_event("7", Err(FetchError::Api("Token not found".into()))));
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Error);
        assert_eq!(s.error, Some("Token not found"));

        c.set_search_term("70", LocationUpdate::Replace);
        assert_eq!(drain(&mut rx), vec![item_req("7"), item_req("70")]);
        assert_eq!(c.current_state().status, FetchStatus::Loading);
        assert!(c.current_state().error.is_none());
    }

    #[test]
    fn browse_pages_survive_lookup_detour() {
        let (mut c, mut rx) = browse_controller();
        c.on_event(page_event("1", Ok(page("1", &["a"], Some("2")))));

        c.set_search_term("42", LocationUpdate::Replace);
        assert!(c.current_state().pages.is_empty());
        assert!(!c.fetch_next_page());

        c.set_search_term("", LocationUpdate::Replace);
        assert_eq!(drain(&mut rx), vec![item_req("42")]);
        let s = c.current_state();
        assert_eq!(s.mode, Mode::Browse);
        assert_eq!(s.status, FetchStatus::Success);
        assert!(s.has_next_page);
        assert_eq!(names(&c), vec!["a"]);
    }

    #[test]
    fn page_arriving_during_lookup_is_kept_for_browse() {
        let (mut c, mut rx) = browse_controller();
        c.set_search_term("5", LocationUpdate::Replace);
        c.on_event(page_event("1", Ok(page("1", &["a"], None))));
        assert!(c.current_state().pages.is_empty());

        c.set_search_term("", LocationUpdate::Replace);
        assert_eq!(drain(&mut rx), vec![item_req("5")]);
        assert_eq!(names(&c), vec!["a"]);
    }

    #[test]
    fn lookup_data_discarded_when_leaving_term() {
        let (mut c, mut rx) = browse_controller();
        c.set_search_term("7", LocationUpdate::Replace);
        c.on_event(item_event("7", Ok(detail("seven"))));
        c.set_search_term("", LocationUpdate::Replace);
        c.set_search_term("7", LocationUpdate::Replace);

        assert_eq!(drain(&mut rx), vec![item_req("7"), item_req("7")]);
        assert!(c.current_state().item.is_none());
        assert_eq!(c.current_state().status, FetchStatus::Loading);
    }

    #[test]
    fn search_term_is_written_to_location() {
        let (mut c, _rx) = browse_controller();
        c.set_search_term("1", LocationUpdate::Push);
        c.set_search_term("12", LocationUpdate::Replace);
        assert_eq!(c.location().href(), "/project?search=12");
        assert_eq!(c.location().len(), 2);

        assert!(c.location_mut().back());
        c.sync_from_location();
        assert_eq!(c.search_term(), "");
        assert_eq!(c.mode(), Mode::Browse);
    }

    #[test]
    fn initial_location_selects_lookup() {
        let (tx, mut rx) = unbounded_channel();
        let c = Controller::new(MemoryLocation::from_link("/project?search=42"), tx);
        assert_eq!(c.mode(), Mode::Lookup);
        assert_eq!(drain(&mut rx), vec![item_req("42")]);

        let s = c.current_state();
        assert_eq!(s.mode, Mode::Lookup);
        assert!(s.is_fetching);
    }

    #[test]
    fn stopped_fetcher_surfaces_error() {
        let (tx, rx) = unbounded_channel();
        drop(rx);
        let mut c = Controller::new(MemoryLocation::new(Route::project()), tx);
        let s = c.current_state();
        assert_eq!(s.status, FetchStatus::Error);
        assert_eq!(s.error, Some("fetcher stopped"));
        assert!(!s.is_fetching);

        c.set_search_term("3", LocationUpdate::Replace);
        assert_eq!(c.current_state().status, FetchStatus::Error);
    }
}
