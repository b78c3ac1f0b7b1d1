use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;

use crate::constants;
use crate::theme::Theme;

/// palaview - Pala listing viewer
///
/// Terminal UI for browsing marketplace listings of one project, cheapest first,
/// and looking up single items by number.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "palaview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pala listing viewer", long_about = None)]
pub struct CliArgs {
    /// Listing API base URL
    #[arg(long, env = "PALA_API_URL")]
    pub api_url: Option<String>,

    /// Project contract whose listings are shown
    #[arg(long, env = "PROJECT_CONTRACT_ADDRESS")]
    pub contract_address: Option<String>,

    /// Wallet address sent with every request
    #[arg(long, env = "WALLET_ADDRESS")]
    pub wallet_address: Option<String>,

    /// Device fingerprint sent with item lookups
    #[arg(long, env = "DEVICE_FINGERPRINT")]
    pub device_fingerprint: Option<String>,

    /// Listing order (e.g. listPriceInKlay.asc)
    #[arg(long, env = "ORDER_BY")]
    pub order_by: Option<String>,

    /// Items per page (1-100)
    #[arg(long, env = "PAGE_LIMIT")]
    pub page_limit: Option<u32>,

    /// HTTP request timeout in milliseconds (1000-60000)
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// How long a cached response stays fresh, in milliseconds (0-600000)
    #[arg(long, env = "STALE_TIME_MS")]
    pub stale_time_ms: Option<u64>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Color theme: nord, amber-crt
    #[arg(long, env = "THEME", value_parser = clap::value_parser!(Theme))]
    pub theme: Option<Theme>,

    /// File receiving log output (the terminal is in raw mode)
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<String>,

    /// Deep link to open, e.g. palaview://project?search=42 or /project
    pub link: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub contract_address: String,
    pub wallet_address: String,
    pub device_fingerprint: String,
    pub order_by: String,
    pub page_limit: u32,
    pub request_timeout_ms: u64,
    pub stale_time_ms: u64,
    pub render_fps: u32,
    pub theme: Theme,
    pub log_file: String,
    pub link: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: constants::api::BASE_URL.to_string(),
            contract_address: constants::api::PROJECT_CONTRACT_ADDRESS.to_string(),
            wallet_address: constants::api::ZERO_WALLET_ADDRESS.to_string(),
            device_fingerprint: constants::api::DEVICE_FINGERPRINT.to_string(),
            order_by: constants::api::ORDER_BY.to_string(),
            page_limit: constants::api::PAGE_LIMIT,
            request_timeout_ms: constants::api::REQUEST_TIMEOUT_MS,
            stale_time_ms: constants::cache::STALE_TIME_MS,
            render_fps: constants::ui::RENDER_FPS,
            theme: Theme::default(),
            log_file: "./palaview.log".to_string(),
            link: None,
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (http/https only)
fn validate_url(raw: &str, name: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    let parsed = url::Url::parse(raw).map_err(|e| anyhow!("{name} is not a valid URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("{name} must use http:// or https://, got {other}://")),
    }
}

/// Reject empty strings and anything that would need escaping in a path segment
fn validate_token(val: &str, name: &str) -> Result<()> {
    if val.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if !val.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-') {
        return Err(anyhow!("{name} contains invalid characters: {val}"));
    }
    Ok(())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

/// Resolve parsed CLI args into a validated [`Config`]
pub fn from_args(args: CliArgs) -> Result<Config> {
    let defaults = Config::default();

    let api_url = args
        .api_url
        .or_else(|| env::var("PALA_API_URL").ok())
        .unwrap_or(defaults.api_url);
    validate_url(&api_url, "PALA_API_URL")?;
    let api_url = api_url.trim_end_matches('/').to_string();

    let contract_address = args
        .contract_address
        .or_else(|| env::var("PROJECT_CONTRACT_ADDRESS").ok())
        .unwrap_or(defaults.contract_address);
    validate_token(&contract_address, "PROJECT_CONTRACT_ADDRESS")?;

    let wallet_address = args
        .wallet_address
        .or_else(|| env::var("WALLET_ADDRESS").ok())
        .unwrap_or(defaults.wallet_address);
    validate_token(&wallet_address, "WALLET_ADDRESS")?;

    let device_fingerprint = args
        .device_fingerprint
        .or_else(|| env::var("DEVICE_FINGERPRINT").ok())
        .unwrap_or(defaults.device_fingerprint);
    validate_token(&device_fingerprint, "DEVICE_FINGERPRINT")?;

    let order_by = args
        .order_by
        .or_else(|| env::var("ORDER_BY").ok())
        .unwrap_or(defaults.order_by);
    validate_token(&order_by, "ORDER_BY")?;

    let page_limit = args
        .page_limit
        .or_else(|| env_parsed("PAGE_LIMIT"))
        .unwrap_or(defaults.page_limit);
    let page_limit = validate_in_range(page_limit, 1, 100, "PAGE_LIMIT")?;

    let request_timeout_ms = args
        .request_timeout_ms
        .or_else(|| env_parsed("REQUEST_TIMEOUT_MS"))
        .unwrap_or(defaults.request_timeout_ms);
    let request_timeout_ms =
        validate_in_range(request_timeout_ms, 1000, 60000, "REQUEST_TIMEOUT_MS")?;

    let stale_time_ms = args
        .stale_time_ms
        .or_else(|| env_parsed("STALE_TIME_MS"))
        .unwrap_or(defaults.stale_time_ms);
    let stale_time_ms = validate_in_range(stale_time_ms, 0, 600_000, "STALE_TIME_MS")?;

    let render_fps = args
        .render_fps
        .or_else(|| env_parsed("RENDER_FPS"))
        .unwrap_or(defaults.render_fps);
    let render_fps = validate_in_range(render_fps, 1, 120, "RENDER_FPS")?;

    let theme = args
        .theme
        .or_else(|| env_parsed("THEME"))
        .unwrap_or(defaults.theme);

    let log_file = args
        .log_file
        .or_else(|| env::var("LOG_FILE").ok())
        .unwrap_or(defaults.log_file);

    if let Some(ref link) = args.link {
        if crate::router::parse(link).is_none() {
            return Err(anyhow!("Unrecognized link '{link}'. Try /project?search=<number>"));
        }
    }

    Ok(Config {
        api_url,
        contract_address,
        wallet_address,
        device_fingerprint,
        order_by,
        page_limit,
        request_timeout_ms,
        stale_time_ms,
        render_fps,
        theme,
        log_file,
        link: args.link,
    })
}

impl Config {
    /// Log the effective configuration (useful for debugging)
    pub fn log_summary(&self) {
        log::info!("palaview configuration:");
        log::info!("  API URL: {}", self.api_url);
        log::info!("  Project: {}", self.contract_address);
        log::info!("  Order: {} ({} per page)", self.order_by, self.page_limit);
        log::info!("  Request Timeout: {}ms", self.request_timeout_ms);
        log::info!("  Stale Time: {}ms", self.stale_time_ms);
        log::info!("  Render FPS: {}", self.render_fps);
        log::info!("  Theme: {}", self.theme);
        if let Some(ref link) = self.link {
            log::info!("  Initial Link: {link}");
        }
    }
}
