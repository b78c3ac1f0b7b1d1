//! Navigable location holding the search term.
//!
//! The search term lives in the location (as the `search` parameter of the
//! project route) so it survives back/forward navigation and can be shared as a
//! link. [`Location`] is the read/write contract the controller depends on;
//! [`MemoryLocation`] is the in-process history stack used by the terminal UI.

use crate::router::{self, Route};

/// How a location write interacts with history
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationUpdate {
    /// Overwrite the current entry (typing in the search box)
    Replace,
    /// Create a new entry that `back()` can return from
    Push,
}

/// String-typed bound value for the search term
pub trait Location {
    /// Current search term; empty when absent
    fn search(&self) -> String;

    /// Whether the listing screen is showing; browsing only runs there
    fn shows_listings(&self) -> bool {
        true
    }

    /// Write the search term, replacing or pushing a history entry
    fn set_search(&mut self, value: &str, update: LocationUpdate);
}

/// History stack of routes with a cursor, like a browser session history
#[derive(Clone, Debug)]
pub struct MemoryLocation {
    entries: Vec<Route>,
    index: usize,
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl MemoryLocation {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Start from a link; unknown links fall back to home
    pub fn from_link(link: &str) -> Self {
        let route = router::parse(link).unwrap_or_else(|| {
            log::warn!("[location] unrecognized link {link:?}, starting at home");
            Route::Home
        });
        Self::new(route)
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.index]
    }

    pub fn href(&self) -> String {
        self.current().to_href()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Move to `route`; pushing drops any forward entries
    pub fn navigate(&mut self, route: Route, update: LocationUpdate) {
        match update {
            LocationUpdate::Replace => {
                self.entries[self.index] = route;
            }
            LocationUpdate::Push => {
                if self.entries[self.index] == route {
                    return;
                }
                self.entries.truncate(self.index + 1);
                self.entries.push(route);
                self.index += 1;
            }
        }
        log::debug!("[location] {:?} -> {}", update, self.href());
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        log::debug!("[location] back -> {}", self.href());
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        log::debug!("[location] forward -> {}", self.href());
        true
    }
}

impl Location for MemoryLocation {
    fn search(&self) -> String {
        self.current().search().to_string()
    }

    fn shows_listings(&self) -> bool {
        matches!(self.current(), Route::Project { .. })
    }

    /// The search parameter only exists on the project route, so writing it
    /// from home moves to the project screen.
    fn set_search(&mut self, value: &str, update: LocationUpdate) {
        self.navigate(
            Route::Project {
                search: value.to_string(),
            },
            update,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_keeps_history_length() {
        let mut loc = MemoryLocation::new(Route::project());
        loc.set_search("4", LocationUpdate::Replace);
        loc.set_search("42", LocationUpdate::Replace);
        assert_eq!(loc.search(), "42");
        assert_eq!(loc.len(), 1);
        assert!(!loc.can_go_back());
    }

    #[test]
    fn push_creates_back_entry() {
        let mut loc = MemoryLocation::new(Route::project());
        loc.set_search("7", LocationUpdate::Push);
        loc.set_search("8", LocationUpdate::Push);
        assert_eq!(loc.href(), "/project?search=8");

        assert!(loc.back());
        assert_eq!(loc.search(), "7");
        assert!(loc.back());
        assert_eq!(loc.search(), "");
        assert!(!loc.back());

        assert!(loc.forward());
        assert_eq!(loc.search(), "7");
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut loc = MemoryLocation::new(Route::project());
        loc.set_search("1", LocationUpdate::Push);
        loc.set_search("2", LocationUpdate::Push);
        loc.back();
        loc.set_search("3", LocationUpdate::Push);
        assert!(!loc.can_go_forward());
        assert_eq!(loc.len(), 3);
        loc.back();
        assert_eq!(loc.search(), "1");
    }

    #[test]
    fn push_of_same_route_is_ignored() {
        let mut loc = MemoryLocation::new(Route::project());
        loc.set_search("", LocationUpdate::Push);
        assert_eq!(loc.len(), 1);
    }

    #[test]
    fn search_from_home_moves_to_project() {
        let mut loc = MemoryLocation::default();
        assert_eq!(loc.search(), "");
        loc.set_search("5", LocationUpdate::Push);
        assert_eq!(loc.current(), &Route::Project { search: "5".into() });
        loc.back();
        assert_eq!(loc.current(), &Route::Home);
    }

    #[test]
    fn from_link_reads_search() {
        let loc = MemoryLocation::from_link("palaview://project?search=42");
        assert_eq!(loc.search(), "42");
        assert_eq!(MemoryLocation::from_link("/nope").current(), &Route::Home);
    }
}
