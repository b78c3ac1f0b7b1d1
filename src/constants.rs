//! Application constants
//!
//! Listing API defaults, cache timing, and the user-facing strings shown by the
//! project screen.

/// Listing API defaults (overridable through config)
pub mod api {
    pub const BASE_URL: &str = "https://api.pala.world/tokens";

    pub const PROJECT_CONTRACT_ADDRESS: &str = "0x22D28b7E69eb45FDEaaf7B57161A53d94c648cAf";

    /// Anonymous wallet; the API requires the parameter but we never sign in
    pub const ZERO_WALLET_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

    pub const DEVICE_FINGERPRINT: &str = "00b139586f748ed2adf91b838d9f99c2";

    /// Cheapest listings first
    pub const ORDER_BY: &str = "listPriceInKlay.asc";

    pub const PAGE_LIMIT: u32 = 20;

    pub const REQUEST_TIMEOUT_MS: u64 = 8000;
}

/// Query cache behavior
pub mod cache {
    /// Window during which an identical request is answered from cache
    pub const STALE_TIME_MS: u64 = 30_000;
}

/// Terminal UI constants
pub mod ui {
    pub const RENDER_FPS: u32 = 30;

    /// Duration to show toast notifications (seconds)
    pub const TOAST_DURATION_SECS: u64 = 2;
}

/// User-facing message strings
pub mod messages {
    pub const LOADING: &str = "Loading...";

    pub const LOADING_MORE: &str = "Loading more...";

    pub const LOAD_MORE: &str = "Load More";

    pub const NOTHING_MORE: &str = "Nothing more to load";

    pub const FETCHING: &str = "Fetching...";

    pub const SEARCH_HINT: &str = "(Press / to search by item number)";
}
