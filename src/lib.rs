//! palaview - Pala listing viewer
//!
//! Terminal UI for one marketplace project: browse its listings cheapest
//! first, page by page, or look up a single item by number.
//!
//! ## Architecture
//!
//! - [`controller`]: browse/lookup state machine driven by the search term
//! - [`fetcher`] + [`cache`]: request execution with a short-lived shared cache
//! - [`location`] + [`router`]: the search term lives in the current route
//! - [`app`] + [`ui`]: terminal view state and ratatui rendering
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- palaview://project?search=42
//! ```

// Core modules
pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util_text;

// Listing API client and cursor handling
pub mod api;
pub mod cursor;

// Request cache and fetcher task
pub mod cache;
pub mod fetcher;

// Deep link router and in-memory history
pub mod location;
pub mod router;

// Fetch state machine
pub mod controller;

// Application-lifetime context
pub mod context;

// Theme + view layer
pub mod theme;
pub mod app;
pub mod ui;

// Re-export commonly used types
pub use app::{App, InputMode};
pub use config::Config;
pub use context::AppContext;
pub use controller::{Controller, FetchState, FetchStatus, Mode};
pub use error::{FetchError, FetchResult};
pub use types::{AppEvent, Cursor, Item, ItemDetail, Page};
