//! Environment-based configuration, fixed at startup.

use std::env;

/// Account/balance mode selected at the venue after connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountMode {
    Practice,
    Real,
}

impl AccountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountMode::Practice => "PRACTICE",
            AccountMode::Real => "REAL",
        }
    }
}

/// Which market segment the engine scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Standard,
    Otc,
    All,
}

impl ScanMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" | "OP" => Some(ScanMode::Standard),
            "OTC" => Some(ScanMode::Otc),
            "ALL" => Some(ScanMode::All),
            _ => None,
        }
    }
}

/// Operational parameters, read once at startup and never re-read.
#[derive(Debug, Clone)]
pub struct Config {
    pub account_mode: AccountMode,
    pub scan_mode: ScanMode,
    /// Candle duration in seconds (60 or 300 for signal partitions).
    pub timeframe_secs: u32,
    /// Historical window passed to the indicator pipeline per tick.
    pub candle_count: usize,
    /// Minutes between "instrument list refresh due" markers (0 = disabled).
    pub refresh_interval_minutes: u32,
    /// Path to the instrument metadata CSV.
    pub asset_file: String,
    /// Base URL of the remote signal store.
    pub sink_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_mode: AccountMode::Practice,
            scan_mode: ScanMode::Otc,
            timeframe_secs: 300,
            candle_count: 100,
            refresh_interval_minutes: 60,
            asset_file: "assets.csv".to_string(),
            sink_url: "http://localhost:8080/signals".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Config::default();

        let account_mode = match env::var("ACCOUNT_MODE") {
            Ok(v) => match v.to_ascii_uppercase().as_str() {
                "PRACTICE" => AccountMode::Practice,
                "REAL" => AccountMode::Real,
                other => return Err(format!("Invalid ACCOUNT_MODE: {}", other)),
            },
            Err(_) => defaults.account_mode,
        };

        let scan_mode = match env::var("SCAN_MODE") {
            Ok(v) => ScanMode::parse(&v).ok_or_else(|| format!("Invalid SCAN_MODE: {}", v))?,
            Err(_) => defaults.scan_mode,
        };

        let timeframe_secs = parse_var("TIMEFRAME_SECONDS", defaults.timeframe_secs)?;
        if timeframe_secs == 0 || timeframe_secs % 60 != 0 {
            return Err(format!(
                "TIMEFRAME_SECONDS must be a positive multiple of 60, got {}",
                timeframe_secs
            ));
        }

        Ok(Self {
            account_mode,
            scan_mode,
            timeframe_secs,
            candle_count: parse_var("CANDLE_COUNT", defaults.candle_count)?,
            refresh_interval_minutes: parse_var(
                "REFRESH_INTERVAL_MINUTES",
                defaults.refresh_interval_minutes,
            )?,
            asset_file: env::var("ASSET_FILE").unwrap_or(defaults.asset_file),
            sink_url: env::var("SINK_URL").unwrap_or(defaults.sink_url),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| format!("Invalid {}: {}", name, v)),
        Err(_) => Ok(default),
    }
}

/// Deployment environment, used to pick the log formatter.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}
