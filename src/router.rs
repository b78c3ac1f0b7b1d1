//! Deep link router for palaview
//!
//! Maps links onto the two screens of the viewer. The `search` query parameter
//! of the project route carries the item-number search term, so a link fully
//! describes what the project screen shows.
//!
//! ## Supported Routes
//!
//! - `palaview://home` or `/` - Home screen
//! - `palaview://project` or `/project` - Project listings (browse mode)
//! - `palaview://project?search=42` - Project screen looking up item 42
//!
//! ## Robust Parsing
//!
//! - Case-insensitive scheme and route names: `PALAVIEW://Project`
//! - Single-slash and multi-slash variants: `palaview:/project`, `palaview:///project`
//! - Web hash routing: `#/project?search=7`
//! - Fragments are stripped; unrelated query parameters are ignored
//!
//! ## Example
//!
//! ```rust
//! use palaview::router::{parse, Route};
//!
//! let route = parse("palaview://project?search=42").unwrap();
//! assert_eq!(route, Route::Project { search: "42".to_string() });
//! ```

const SCHEME: &str = "palaview";
pub const SEARCH_PARAM: &str = "search";

/// Split `path?query#frag` into path and query (fragment dropped)
#[inline]
fn split_path_query(s: &str) -> (&str, &str) {
    let s = s.split('#').next().unwrap_or_default();
    match s.find('?') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

/// Extract the part after the palaview scheme (case-insensitive, handles slash variants)
#[inline]
fn after_scheme(raw: &str) -> Option<&str> {
    let s = raw.trim();
    let pos = s.find(':')?;
    if !s[..pos].eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    Some(s[pos + 1..].trim_start_matches('/'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Project listings; empty `search` means browse mode
    Project { search: String },
}

impl Route {
    pub fn project() -> Self {
        Route::Project {
            search: String::new(),
        }
    }

    /// Search term carried by this route (empty outside the project screen)
    pub fn search(&self) -> &str {
        match self {
            Route::Home => "",
            Route::Project { search } => search,
        }
    }

    /// Render as an app-relative href, e.g. `/project?search=42`
    pub fn to_href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Project { search } if search.is_empty() => "/project".to_string(),
            Route::Project { search } => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(SEARCH_PARAM, search)
                    .finish();
                format!("/project?{query}")
            }
        }
    }
}

/// Parse a route from the supported link formats
///
/// Returns `None` for unknown routes.
pub fn parse(raw: &str) -> Option<Route> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(Route::Home);
    }

    let rest = if let Some(rest) = after_scheme(s) {
        rest
    } else if let Some(rest) = s.strip_prefix("#/") {
        rest
    } else {
        s.trim_start_matches('/')
    };

    let (path, query) = split_path_query(rest);
    let page = path
        .split('/')
        .find(|seg| !seg.is_empty())
        .unwrap_or("")
        .to_ascii_lowercase();

    match page.as_str() {
        "" | "home" => Some(Route::Home),
        "project" => {
            let search = url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == SEARCH_PARAM)
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            Some(Route::Project { search })
        }
        _ => None,
    }
}
